use std::fs;
use std::path::PathBuf;

use signature_compiler::{DispatchTreeBuilder, build_tree, parse_signature};
use signature_core::{CommandManifest, DefaultValue, validate_commands};

#[test]
fn test_make_fixture_classifies_namespace() {
    let parsed = parse_signature(&fixture("make.sig"), "Code generators");

    assert!(parsed.is_namespace_command);
    assert!(!parsed.is_hidden);
    assert_eq!(parsed.base_command, "make");
    assert_eq!(parsed.description.as_deref(), Some("Code generators"));
    assert_eq!(
        parsed.sub_command_names(),
        vec!["controller", "model", "migration", "name"]
    );

    let force = parsed.find_option("--force").expect("shared force flag");
    assert!(force.shared);
    assert!(!force.required);

    let lang = parsed.find_option("-l").expect("lang flag");
    assert_eq!(lang.default_value, Some(DefaultValue::String("ts".into())));
    assert!(!lang.shared);
}

#[test]
fn test_make_fixture_builds_children_with_shared_options() {
    let tree = build(&[("make.sig", "make")]);
    assert_eq!(
        tree.command_names(),
        vec!["make", "make:controller", "make:model", "make:migration"]
    );

    let parent = tree.find("make").unwrap();
    let parent_flags: Vec<_> = parent.flags.iter().map(|f| f.spec.as_str()).collect();
    assert_eq!(parent_flags, vec!["--force", "-l, --lang <lang>"]);

    let controller = tree.find("make:controller").unwrap();
    let flags: Vec<_> = controller.flags.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(flags, vec!["force", "api", "resource"]);
    assert_eq!(controller.arguments[0].spec, "<name>");
    assert_eq!(
        controller.find_flag("force").unwrap().description,
        "Overwrite the controller if it already exists"
    );
    assert!(controller.find_flag("lang").is_none());
}

#[test]
fn test_make_fixture_flag_specs() {
    let tree = build(&[("make.sig", "make")]);

    let model = tree.find("make:model").unwrap();
    let fillable = model.find_flag("--fillable").unwrap();
    assert_eq!(fillable.spec, "-f, --fillable [fillable...]");
    assert!(fillable.multiple);
    assert_eq!(
        model.find_flag("migration").unwrap().description,
        "Also create a migration for model"
    );

    let migration = tree.find("make:migration").unwrap();
    let table = migration.find_flag("-t").unwrap();
    assert_eq!(table.spec, "-t, --table <table>");
    assert_eq!(table.default_value, Some(DefaultValue::String(String::new())));
    assert_eq!(table.description, "The table to migrate for migration");
}

#[test]
fn test_hidden_sub_command_never_registered() {
    let tree = build(&[("make.sig", "make")]);
    assert!(tree.find("make:stub").is_none());
    assert!(
        !tree
            .command_names()
            .iter()
            .any(|name| name.ends_with(":stub"))
    );
}

#[test]
fn test_migrate_fixture_defaults_and_hidden_flags() {
    let tree = build(&[("migrate.sig", "migrate")]);

    let parent = tree.find("migrate").unwrap();
    assert!(parent.find_flag("pretend").unwrap().hidden);
    assert!(!parent.find_flag("database").unwrap().hidden);

    let run = tree.find("migrate:run").unwrap();
    let names: Vec<_> = run.flags.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["database", "step"]);
    assert_eq!(
        run.find_flag("step").unwrap().default_value,
        Some(DefaultValue::Number(1.0))
    );

    let fresh = tree.find("migrate:fresh").unwrap();
    assert_eq!(
        fresh.find_flag("seed").unwrap().default_value,
        Some(DefaultValue::Bool(false))
    );
    assert!(fresh.find_flag("pretend").is_none());
}

#[test]
fn test_serve_fixture_plain_command() {
    let tree = build(&[("serve.sig", "serve")]);
    let serve = tree.find("serve").unwrap();

    assert!(serve.sub_commands.is_empty());
    assert_eq!(serve.arguments.len(), 1);
    assert_eq!(serve.arguments[0].spec, "[host]");

    let port = serve.find_flag("port").unwrap();
    assert_eq!(port.spec, "-p, --port <port>");
    assert_eq!(port.default_value, Some(DefaultValue::Number(8000.0)));
    assert!(serve.find_flag("inspect").unwrap().hidden);
}

#[test]
fn test_tree_registration_order_follows_registration() {
    let tree = build(&[
        ("serve.sig", "serve"),
        ("make.sig", "make"),
        ("migrate.sig", "migrate"),
    ]);
    let top: Vec<_> = tree.commands.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(top, vec!["serve", "make", "migrate"]);
    assert_eq!(tree.route("migrate:rollback").unwrap().sub_command, Some("rollback"));
}

#[test]
fn test_building_twice_is_identical() {
    let first = build(&[("make.sig", "make"), ("migrate.sig", "migrate")]);
    let second = build(&[("make.sig", "make"), ("migrate.sig", "migrate")]);
    assert_eq!(first, second);
}

#[test]
fn test_fixtures_pass_validation() {
    let commands: Vec<_> = ["make.sig", "migrate.sig", "serve.sig"]
        .iter()
        .map(|name| parse_signature(&fixture(name), ""))
        .collect();
    assert!(validate_commands(&commands).is_empty());
}

#[test]
fn test_manifest_fixture_builds_tree() {
    let path = fixture_path("manifest.yml");
    let manifest = CommandManifest::load(&path).expect("manifest fixture should load");
    let tree = build_tree(&manifest).expect("manifest should build");

    assert_eq!(
        tree.command_names(),
        vec!["make", "make:controller", "make:model", "serve"]
    );
    assert!(tree.find("legacy").is_none());

    let route = tree.route("make:model").unwrap();
    assert_eq!(route.handler, "generate");
    assert_eq!(route.sub_command, Some("model"));
    assert_eq!(
        route.entry.find_argument("name").unwrap().description,
        "The name of the model"
    );
}

fn build(fixtures: &[(&str, &'static str)]) -> signature_core::DispatchTree<&'static str> {
    let mut builder = DispatchTreeBuilder::new();
    for (name, handler) in fixtures {
        builder
            .register(parse_signature(&fixture(name), ""), *handler)
            .expect("lenient builder accepts every command");
    }
    builder.build()
}

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name)).expect("fixture file must be readable")
}
