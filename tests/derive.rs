use ini_cfg::{bind, bind_section, parse, Bind, ConfigError, Setting};

#[derive(Debug, Default, Bind)]
struct Group {
    group: String,
}

#[derive(Debug, Default, Bind)]
struct Urls {
    addr: String,
    groups: Vec<Group>,
}

const URLS: &str = r#"
[urls]
addr = "tcp://localhost:6789"
[groups.group0]
group = "udp://224.0.0.1:11001"
[groups.group1]
group = "udp://224.0.0.1:11002"
"#;

#[test]
fn binds_nested_sections_into_a_sequence() {
    let tree = parse(URLS, "urls").unwrap();

    let mut urls = Urls::default();
    bind(&tree, &mut urls, true).unwrap();

    assert_eq!(urls.addr, "tcp://localhost:6789");
    let groups: Vec<_> = urls.groups.iter().map(|g| g.group.as_str()).collect();
    assert_eq!(groups, ["udp://224.0.0.1:11001", "udp://224.0.0.1:11002"]);
}

#[test]
fn binds_a_section_found_by_name() {
    let tree = parse(URLS, "urls").unwrap();

    let mut group = Group::default();
    bind_section(&tree, "group1", &mut group, true).unwrap();
    assert_eq!(group.group, "udp://224.0.0.1:11002");

    assert_eq!(
        bind_section(&tree, "group7", &mut group, true),
        Err(ConfigError::NotFound {
            name: "group7".into()
        })
    );
}

#[derive(Debug, Default, Bind)]
struct Pair<T>
where
    T: Setting,
{
    left: T,
    right: T,
}

#[derive(Debug, Default, Bind)]
struct Marker;

#[test]
fn generic_and_unit_records() {
    let tree = parse("[pair]\nleft = 1\nright = 2\n", "pair").unwrap();

    let mut pair = Pair::<i64>::default();
    bind(&tree, &mut pair, true).unwrap();
    assert_eq!((pair.left, pair.right), (1, 2));

    let mut marker = Marker;
    assert!(bind(&tree, &mut marker, true).is_ok());
}

#[derive(Debug)]
struct Handle(u32);

#[derive(Debug, Bind)]
#[ini(no_nested)]
struct Service {
    #[ini(skip)]
    handle: Handle,
    port: i64,
}

#[test]
fn top_level_record_without_default() {
    let tree = parse("[service]\nport = 8080\n", "service").unwrap();

    let mut service = Service {
        handle: Handle(7),
        port: 0,
    };
    bind(&tree, &mut service, true).unwrap();
    assert_eq!(service.port, 8080);
    assert_eq!(service.handle.0, 7);
}
