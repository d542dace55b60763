// License: MIT

#[cfg(test)]
use super::*;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use pretty_assertions::assert_eq;

use crate::Bind;

const ACCOUNT: &str = r#"
[account]
user = "nobody"
passwd = "foobar"
enabled = true
alias   = ["root", "nobody", "test",]
"#;

const DIRECTORY: &str = r#"
[ldap]
host   = "ldap://localhost:389"
bind   = "cn=admin,dc=foobar,dc=com"
passwd = "helloworld"
base   = "dc=foobar,dc=com"
hash   = "md5"

[users]
;definition of node to lookup user's account
node  = "ou=users,dc=foobar,dc=com"
attr  = "uid"
scope = 2
class = "posixAccount"

[groups]
;definition of node to lookup user's groups
node  = "ou=groups,dc=foobar,dc=com"
attr  = "cn"
scope = 2
class = "posixGroup"
"#;

const URLS: &str = r#"
[urls]
addr = "tcp://localhost:6789"
verbose = true
count = 5
size = 1024
datadir = "/var/tmp/"

[groups.group0]
group  = "udp://224.0.0.1:11001"
prefix = "0xbeef"
size   = 1024
keep   = false

[groups.group1]
group  = "udp://224.0.0.1:11002"
prefix = "0xdead"
size   = 1024
keep   = false
"#;

#[derive(Debug, Default, PartialEq, Bind)]
struct Account {
    user: String,
    passwd: String,
    enabled: bool,
    alias: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Bind)]
struct Node {
    node: String,
    attr: String,
    class: String,
    scope: u8,
}

#[derive(Debug, Default, PartialEq, Bind)]
struct Directory {
    host: String,
    bind: String,
    passwd: String,
    base: String,
    hash: String,
    users: Node,
    groups: Node,
}

#[derive(Debug, Default, PartialEq, Bind)]
struct Group {
    group: String,
    prefix: String,
    keep: bool,
    size: i64,
}

#[derive(Debug, Default, PartialEq, Bind)]
struct Multiplex {
    addr: String,
    verbose: bool,
    count: u32,
    size: usize,
    datadir: PathBuf,
    groups: Vec<Group>,
}

#[test]
fn test_read_account() {
    let config = IniConfig::from_str(ACCOUNT, "account").expect("Failed to parse config");

    let mut a = Account {
        user: "root".into(),
        passwd: "helloworld".into(),
        ..Default::default()
    };
    config.read(&mut a).expect("Failed to bind account");

    assert_eq!(
        a,
        Account {
            user: "nobody".into(),
            passwd: "foobar".into(),
            enabled: true,
            alias: vec!["root".into(), "nobody".into(), "test".into()],
        }
    );
}

#[test]
fn test_read_nested_records() {
    let config = IniConfig::from_str(DIRECTORY, "ldap").unwrap();

    let mut d = Directory::default();
    config.read(&mut d).unwrap();

    assert_eq!(d.host, "ldap://localhost:389");
    assert_eq!(d.users.node, "ou=users,dc=foobar,dc=com");
    assert_eq!(d.users.scope, 2);
    assert_eq!(d.groups.node, "ou=groups,dc=foobar,dc=com");
    assert_eq!(d.groups.class, "posixGroup");
}

#[test]
fn test_sections_bind_into_sequence_in_declaration_order() {
    let config = IniConfig::from_str(URLS, "urls").unwrap();

    let mut m = Multiplex::default();
    config.read(&mut m).unwrap();

    assert_eq!(m.addr, "tcp://localhost:6789");
    assert!(m.verbose);
    assert_eq!(m.count, 5);
    assert_eq!(m.size, 1024);
    assert_eq!(m.datadir, PathBuf::from("/var/tmp/"));

    let groups: Vec<&str> = m.groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(groups, vec!["udp://224.0.0.1:11001", "udp://224.0.0.1:11002"]);
    assert_eq!(m.groups[1].prefix, "0xdead");
}

#[test]
fn test_sequence_appends_to_existing_elements() {
    let config = IniConfig::from_str(URLS, "urls").unwrap();

    let mut m = Multiplex {
        groups: vec![Group {
            group: "preset".into(),
            ..Default::default()
        }],
        ..Default::default()
    };
    config.read(&mut m).unwrap();

    assert_eq!(m.groups.len(), 3);
    assert_eq!(m.groups[0].group, "preset");
}

#[test]
fn test_read_section() {
    let config = IniConfig::from_str(DIRECTORY, "ldap").unwrap();

    let mut node = Node::default();
    config.read_section("users", &mut node).unwrap();
    assert_eq!(node.attr, "uid");

    let mut d = Directory::default();
    config.read_section("ldap", &mut d).unwrap();
    assert_eq!(d.hash, "md5");
}

#[test]
fn test_read_section_not_found() {
    let config = IniConfig::from_str(ACCOUNT, "account").unwrap();

    let mut d = Directory::default();
    assert_eq!(
        config.read_section("directory", &mut d),
        Err(ConfigError::NotFound {
            name: "directory".into()
        })
    );
}

#[test]
fn test_field_matching_is_case_insensitive() {
    let config = IniConfig::from_str("[account]\nUSER = \"x\"\nEnabled = true\n", "account").unwrap();

    let mut a = Account::default();
    config.read(&mut a).unwrap();

    assert_eq!(a.user, "x");
    assert!(a.enabled);
}

#[test]
fn test_strict_missing_field() {
    let input = "[account]\nuser = \"nobody\"\n";
    let root = parse(input, "account").unwrap();

    let mut a = Account {
        passwd: "keep".into(),
        ..Default::default()
    };
    bind(&root, &mut a, false).expect("non-strict bind should succeed");
    assert_eq!(a.user, "nobody");
    assert_eq!(a.passwd, "keep");

    let mut a = Account::default();
    assert_eq!(
        bind(&root, &mut a, true),
        Err(ConfigError::MissingField {
            field: "passwd".into(),
            section: "account".into(),
        })
    );
    // Fields before the failure keep their values.
    assert_eq!(a.user, "nobody");
}

#[test]
fn test_type_mismatch() {
    let input = "[account]\nuser = 42\npasswd = \"p\"\nenabled = \"yes\"\nalias = [\"a\",]\n";
    let root = parse(input, "account").unwrap();

    let mut a = Account {
        user: "root".into(),
        ..Default::default()
    };
    bind(&root, &mut a, false).unwrap();
    assert_eq!(a.user, "root");
    assert_eq!(a.passwd, "p");
    assert!(!a.enabled);
    assert_eq!(a.alias, vec!["a".to_string()]);

    let mut a = Account::default();
    assert_eq!(
        bind(&root, &mut a, true),
        Err(ConfigError::TypeMismatch {
            field: "user".into(),
            expected: "string".into(),
            found: "integer".into(),
        })
    );
}

#[test]
fn test_element_mismatch_aborts_whole_list() {
    let input = "[account]\nuser = \"u\"\npasswd = \"p\"\nenabled = no\nalias = [\"a\", 2,]\n";
    let root = parse(input, "account").unwrap();

    let mut a = Account {
        alias: vec!["keep".into()],
        ..Default::default()
    };
    bind(&root, &mut a, false).unwrap();
    assert_eq!(a.alias, vec!["keep".to_string()]);

    let err = bind(&root, &mut Account::default(), true).unwrap_err();
    assert_eq!(
        err,
        ConfigError::TypeMismatch {
            field: "alias".into(),
            expected: "string".into(),
            found: "integer".into(),
        }
    );
}

#[test]
fn test_integer_out_of_range() {
    let input = "[node]\nnode = \"n\"\nattr = \"a\"\nclass = \"c\"\nscope = 300\n";
    let root = parse(input, "node").unwrap();

    let err = Binder::new()
        .strict(true)
        .bind(&root, &mut Node::default())
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::OutOfRange {
            field: "scope".into(),
            value: "300".into(),
            target: "u8",
        }
    );
}

#[test]
fn test_strict_missing_nested_section() {
    let root = parse("[ldap]\nhost = \"h\"\nbind = \"b\"\npasswd = \"p\"\nbase = \"b\"\nhash = \"h\"\n", "ldap").unwrap();

    let mut d = Directory::default();
    bind(&root, &mut d, false).unwrap();
    assert_eq!(d.users, Node::default());

    assert_eq!(
        bind(&root, &mut Directory::default(), true),
        Err(ConfigError::MissingField {
            field: "users".into(),
            section: "ldap".into(),
        })
    );
}

#[derive(Debug, Default, Bind)]
struct Users {
    users: Node,
}

#[test]
fn test_record_field_given_as_option_is_mismatch() {
    let root = parse("[ldap]\nusers = \"oops\"\n", "ldap").unwrap();

    let mut u = Users::default();
    bind(&root, &mut u, false).unwrap();
    assert_eq!(u.users, Node::default());

    assert_eq!(
        bind(&root, &mut Users::default(), true),
        Err(ConfigError::TypeMismatch {
            field: "users".into(),
            expected: "section".into(),
            found: "string".into(),
        })
    );
}

#[derive(Debug, Default, PartialEq, Bind)]
struct Tuning {
    ratio: f64,
    labels: HashMap<String, String>,
    limits: indexmap::IndexMap<String, Vec<i32>>,
    backup: Option<String>,
    raw: Option<Value>,
}

#[test]
fn test_maps_floats_and_options() {
    let input = r#"
[tuning]
ratio = 0.75
labels = { "env": "prod", "tier": "web", }
limits = { "a": [1, 2,], "b": [], }
backup = null
raw = [1, "two",]
"#;
    let root = parse(input, "tuning").unwrap();

    let mut t = Tuning {
        backup: Some("old".into()),
        ..Default::default()
    };
    bind(&root, &mut t, true).unwrap();

    assert_eq!(t.ratio, 0.75);
    assert_eq!(t.labels.get("env").map(String::as_str), Some("prod"));
    assert_eq!(t.labels.len(), 2);
    assert_eq!(t.limits.get("a"), Some(&vec![1, 2]));
    assert_eq!(t.limits.get("b"), Some(&vec![]));
    assert_eq!(t.backup, None);
    assert_eq!(
        t.raw,
        Some(Value::List(vec![Value::Int(1), Value::String("two".into())]))
    );
}

#[test]
fn test_mapping_field_skips_sections_even_in_strict_mode() {
    let input = "[tuning]\nratio = 1.0\nbackup = \"b\"\nraw = null\nlimits = {}\n[labels]\nenv = \"prod\"\n";
    let root = parse(input, "tuning").unwrap();

    let mut t = Tuning::default();
    bind(&root, &mut t, true).unwrap();
    assert!(t.labels.is_empty());
}

#[test]
fn test_integer_does_not_bind_to_float() {
    let root = parse("[tuning]\nratio = 1\n", "tuning").unwrap();

    let mut t = Tuning {
        ratio: 0.5,
        ..Default::default()
    };
    bind(&root, &mut t, false).unwrap();
    assert_eq!(t.ratio, 0.5);
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Timestamp(u64);

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('@')
            .and_then(|n| n.parse().ok())
            .map(Timestamp)
            .ok_or_else(|| format!("invalid timestamp {:?}", s))
    }
}

crate::from_str_setting!(Timestamp);

#[derive(Debug, Default, Bind)]
struct Window {
    before: Timestamp,
    after: Timestamp,
    listen: Option<SocketAddr>,
    #[ini(parse)]
    workers: u16,
    history: Vec<Timestamp>,
}

#[test]
fn test_capability_conversion() {
    let input = r#"
[window]
before = "@0"
after = "@1577836800"
listen = "127.0.0.1:8080"
workers = "8"
history = ["@1", "@2",]
"#;
    let root = parse(input, "window").unwrap();

    let mut w = Window::default();
    bind(&root, &mut w, true).unwrap();

    assert_eq!(w.before, Timestamp(0));
    assert_eq!(w.after, Timestamp(1577836800));
    assert_eq!(w.listen, Some("127.0.0.1:8080".parse().unwrap()));
    assert_eq!(w.workers, 8);
    assert_eq!(w.history, vec![Timestamp(1), Timestamp(2)]);
}

#[test]
fn test_capability_failure_propagates_in_both_modes() {
    let root = parse("[window]\nbefore = \"yesterday\"\n", "window").unwrap();

    let expected = ConfigError::Capability {
        field: "before".into(),
        message: "invalid timestamp \"yesterday\"".into(),
    };
    assert_eq!(bind(&root, &mut Window::default(), false), Err(expected.clone()));
    assert_eq!(bind(&root, &mut Window::default(), true), Err(expected));
}

#[test]
fn test_capability_requires_string_value() {
    let root = parse("[window]\nbefore = 12\n", "window").unwrap();

    let mut w = Window::default();
    bind(&root, &mut w, false).unwrap();
    assert_eq!(w.before, Timestamp(0));

    assert!(matches!(
        bind(&root, &mut Window::default(), true),
        Err(ConfigError::TypeMismatch { ref field, .. }) if field == "before"
    ));
}

#[derive(Debug, Default, Bind)]
struct Renamed {
    #[ini(rename = "type")]
    kind: String,
    #[ini(skip)]
    cache: Vec<u8>,
    r#match: bool,
}

#[test]
fn test_rename_skip_and_raw_identifiers() {
    let root = parse("[r]\ntype = \"udp\"\nmatch = yes\n", "r").unwrap();

    let mut r = Renamed {
        cache: vec![1],
        ..Default::default()
    };
    bind(&root, &mut r, true).unwrap();

    assert_eq!(r.kind, "udp");
    assert!(r.r#match);
    assert_eq!(r.cache, vec![1]);
}

#[test]
fn test_typed_path_access() {
    let config = IniConfig::from_str(URLS, "urls").unwrap();

    let addr: String = config.get("addr").unwrap();
    assert_eq!(addr, "tcp://localhost:6789");

    let prefix: String = config.get("groups.group1.prefix").unwrap();
    assert_eq!(prefix, "0xdead");

    let size: u16 = config.get("Groups.Group0.SIZE").unwrap();
    assert_eq!(size, 1024);

    assert!(config.has("groups.group0.keep"));
    assert!(!config.has("groups.group9.keep"));
    assert_eq!(config.get_optional::<bool>("groups.group0.missing"), Ok(None));
    assert_eq!(config.get_or("count", 0i64), 5);
    assert_eq!(config.get_or("addr", 7i64), 7);

    assert_eq!(
        config.get::<bool>("addr"),
        Err(ConfigError::TypeMismatch {
            field: "addr".into(),
            expected: "bool".into(),
            found: "string".into(),
        })
    );
}

#[test]
fn test_strict_flag_on_config() {
    let config = IniConfig::from_str(ACCOUNT, "account").unwrap().with_strict(true);
    assert!(config.is_strict());

    let mut d = Directory::default();
    assert!(matches!(
        config.read(&mut d),
        Err(ConfigError::MissingField { .. })
    ));
}

#[test]
fn test_from_reader() {
    let config = IniConfig::from_reader(ACCOUNT.as_bytes(), "account").unwrap();
    assert_eq!(config.root().name(), "account");

    let root = parse_reader(ACCOUNT.as_bytes(), "account").unwrap();
    assert_eq!(&root, config.root());
}

#[test]
fn test_from_file_uses_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("account.ini");
    std::fs::write(&path, ACCOUNT).unwrap();

    let config = IniConfig::from_file(&path).unwrap();
    assert_eq!(config.root().name(), "account");

    let mut a = Account::default();
    config.read(&mut a).unwrap();
    assert_eq!(a.user, "nobody");
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.ini");

    assert!(matches!(
        IniConfig::from_file(&missing),
        Err(ConfigError::File { path, .. }) if path.ends_with("missing.ini")
    ));
}

#[test]
fn test_tree_dump() {
    let root = parse(URLS, "urls").unwrap();
    let dump = serde_json::to_value(&root).unwrap();

    assert_eq!(dump["name"], "urls");
    assert_eq!(dump["options"]["count"], 5);
    assert_eq!(
        dump["sections"]["groups"]["sections"]["group1"]["options"]["prefix"],
        "0xdead"
    );
}
