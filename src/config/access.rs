use super::*;

impl IniConfig {
    /// Bind the top-level section onto `target`.
    ///
    /// # Examples
    /// ```
    /// use ini_cfg::{Bind, IniConfig};
    ///
    /// #[derive(Debug, Default, Bind)]
    /// struct Account {
    ///     user: String,
    ///     enabled: bool,
    /// }
    ///
    /// let config = IniConfig::from_str("[account]\nuser = \"nobody\"\nenabled = yes\n", "account")?;
    /// let mut account = Account::default();
    /// config.read(&mut account)?;
    /// assert_eq!(account.user, "nobody");
    /// assert!(account.enabled);
    /// # Ok::<(), ini_cfg::ConfigError>(())
    /// ```
    pub fn read<T: Bind + ?Sized>(&self, target: &mut T) -> Result<(), ConfigError> {
        self.binder.bind(&self.root, target)
    }

    /// Bind the first section named `name`, searched depth-first.
    ///
    /// # Errors
    /// Returns [`ConfigError::NotFound`] if no section carries that name.
    pub fn read_section<T: Bind + ?Sized>(&self, name: &str, target: &mut T) -> Result<(), ConfigError> {
        self.binder.bind_section(&self.root, name, target)
    }

    /// Get a typed option using dot notation: `groups.group0.size` is the
    /// option `size` of section `group0` below section `groups`.
    ///
    /// Section and option names are matched case-insensitively.
    pub fn get<T: Setting>(&self, path: &str) -> Result<T, ConfigError> {
        let value = self.get_value(path)?;
        T::from_value(value).map_err(|e| e.in_field(path))
    }

    /// Like [`IniConfig::get`], but a missing option or section is `Ok(None)`.
    pub fn get_optional<T: Setting>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        match self.get_value(path) {
            Ok(value) => T::from_value(value).map(Some).map_err(|e| e.in_field(path)),
            Err(ConfigError::MissingField { .. } | ConfigError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value, falling back to `default` when it is missing or has the
    /// wrong type.
    pub fn get_or<T: Setting>(&self, path: &str, default: T) -> T {
        self.get(path).unwrap_or(default)
    }

    pub fn has(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }

    fn get_value(&self, path: &str) -> Result<&Value, ConfigError> {
        let (sections, option) = match path.rsplit_once('.') {
            Some((sections, option)) => (Some(sections), option),
            None => (None, path),
        };

        let mut section = &self.root;
        for name in sections.into_iter().flat_map(|s| s.split('.')) {
            section = section.lookup_child(name).ok_or_else(|| ConfigError::NotFound {
                name: name.to_string(),
            })?;
        }

        section
            .lookup_option(option)
            .ok_or_else(|| ConfigError::MissingField {
                field: option.to_string(),
                section: section.name().to_string(),
            })
    }
}
