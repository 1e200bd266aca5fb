use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

use url::Url;

use crate::error::{CoercionError, Error, InstantiationError, ResolutionError};
use crate::map;
use crate::model::{MarshalOptions, Marshaller};
use crate::registry::{Capability, SubtypeRegistry};
use crate::schema::{Describable, Introspector, Param};
use crate::value::{Interpolated, Map, Value};

// -----------------------------------------------------------------------------
// Fixtures

pub trait Step: Any {}
pub trait Marker: Any {}

crate::capability!(Step, Marker);

#[derive(Debug, PartialEq)]
struct Echo {
    text: String,
}

impl Step for Echo {}
impl Marker for Echo {}

impl Describable for Echo {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<String>("text")], |args| {
            Ok(Echo { text: args.next()? })
        })
        .accessor("text", |e| &e.text);
    }
}

#[derive(Debug, PartialEq, Default)]
struct Toggle {
    flag: bool,
}

impl Step for Toggle {}

impl Describable for Toggle {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([], |_| Ok(Toggle::default()))
            .accessor("is_flag", |t| &t.flag)
            .setter("set_flag", |t, v| t.flag = v);
    }
}

mod other {
    use super::Step;
    use crate::schema::{Describable, Introspector};

    /// Shares its short name with `super::Echo`.
    pub struct Echo;

    impl Step for Echo {}

    impl Describable for Echo {
        fn describe(d: &mut Introspector<Self>) {
            d.designated([], |_| Ok(Echo));
        }
    }
}

fn registry() -> SubtypeRegistry {
    let mut registry = SubtypeRegistry::new();
    registry.register::<dyn Step, Echo>(|v| Arc::new(v));
    registry.register::<dyn Step, Toggle>(|v| Arc::new(v));
    registry.register::<dyn Marker, Echo>(|v| Arc::new(v));
    registry
}

fn downcast<T: Any>(step: &Arc<dyn Step>) -> Option<&T> {
    <dyn Step as Capability>::as_any(&**step).downcast_ref::<T>()
}

/// Constructor parameters plus a setter that must never run.
#[derive(Debug, PartialEq)]
struct Plain {
    text: String,
    flag: bool,
    shorty: i16,
}

impl Describable for Plain {
    fn describe(d: &mut Introspector<Self>) {
        d.designated(
            [Param::of::<String>("text"), Param::of::<bool>("flag")],
            |args| {
                Ok(Plain {
                    text: args.next()?,
                    flag: args.next()?,
                    shorty: 0,
                })
            },
        )
        .accessor("text", |p| &p.text)
        .accessor("is_flag", |p| &p.flag)
        .accessor("get_shorty", |p| &p.shorty)
        .setter("set_shorty", |_, _: i16| panic!("`set_shorty` must not be called"));
    }
}

/// One constructor parameter and two setters.
#[derive(Debug, PartialEq)]
struct Mixed {
    value: String,
    text: Option<String>,
    flag: bool,
}

impl Describable for Mixed {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<String>("value")], |args| {
            Ok(Mixed {
                value: args.next()?,
                text: None,
                flag: false,
            })
        })
        .accessor("value", |m| &m.value)
        .accessor("text", |m| &m.text)
        .accessor("is_flag", |m| &m.flag)
        .setter("set_text", |m, v| m.text = v)
        .setter("set_flag", |m, v| m.flag = v);
    }
}

// -----------------------------------------------------------------------------
// Scalars

#[test]
fn round_trip_constructor_parameters() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! { "text" => "hello", "flag" => true };
    let plain: Plain = marshaller.instantiate(input.clone()).unwrap();
    assert_eq!(
        plain,
        Plain {
            text: "hello".into(),
            flag: true,
            shorty: 0
        }
    );
    assert_eq!(marshaller.uninstantiate(&plain).unwrap(), input);
}

#[test]
fn setters_after_construction() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! { "value" => "main", "text" => "note" };
    let mixed: Mixed = marshaller.instantiate(input.clone()).unwrap();
    assert_eq!(mixed.text.as_deref(), Some("note"));
    assert!(!mixed.flag);
    assert_eq!(marshaller.uninstantiate(&mixed).unwrap(), input);

    let mixed: Mixed = marshaller
        .instantiate(map! { "value" => "main", "flag" => true })
        .unwrap();
    assert_eq!(
        marshaller.uninstantiate(&mixed).unwrap(),
        map! { "value" => "main", "flag" => true }
    );
}

/// A constructor parameter that also has a setter.
#[derive(Debug, PartialEq)]
struct Both {
    value: String,
    sets: u8,
}

impl Describable for Both {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<String>("value")], |args| {
            Ok(Both {
                value: args.next()?,
                sets: 0,
            })
        })
        .accessor("value", |b| &b.value)
        .setter("set_value", |b: &mut Both, v: String| {
            b.value = v;
            b.sets += 1;
        });
    }
}

#[test]
fn parameter_with_setter_binds_once() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! { "value" => "x" };
    let both: Both = marshaller.instantiate(input.clone()).unwrap();
    assert_eq!(
        both,
        Both {
            value: "x".into(),
            sets: 0
        }
    );

    let output = marshaller.uninstantiate(&both).unwrap();
    assert_eq!(output, input);
    assert_eq!(output.keys().collect::<Vec<_>>(), ["value"]);
}

#[test]
fn default_elision() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let mixed = Mixed {
        value: "main".into(),
        text: None,
        flag: false,
    };
    let map = marshaller.uninstantiate(&mixed).unwrap();
    assert_eq!(map, map! { "value" => "main" });
    assert_eq!(map.keys().collect::<Vec<_>>(), ["value"]);
}

#[test]
fn unknown_keys_are_ignored() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let mixed: Mixed = marshaller
        .instantiate(map! { "value" => "main", "bogus" => 1 })
        .unwrap();
    assert_eq!(mixed.value, "main");
}

#[test]
fn missing_required_parameter() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let err = marshaller.instantiate::<Mixed>(map! {}).unwrap_err();
    assert_eq!(
        err,
        Error::Instantiation(InstantiationError::MissingRequiredParameter {
            type_path: type_name::<Mixed>(),
            parameter: "value",
        })
    );
}

#[test]
fn missing_zero_valued_parameter() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let plain: Plain = marshaller.instantiate(map! { "text" => "x" }).unwrap();
    assert!(!plain.flag);
}

#[test]
fn type_mismatch_message() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let err = marshaller
        .instantiate::<Mixed>(map! { "value" => 99 })
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Coercion(CoercionError::TypeMismatch { .. })
    ));
    let message = err.to_string();
    assert!(message.contains(type_name::<Mixed>()), "{message}");
    assert!(message.contains("value"), "{message}");
    assert!(message.contains("alloc::string::String"), "{message}");
    assert!(message.contains("i64"), "{message}");
}

#[test]
fn lazy_text_is_materialized() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let text = Value::text(Interpolated::new(["", " "], ["hello", "world"]));
    let mut input = Map::new();
    input.insert("text".into(), text);
    let echo: Echo = marshaller.instantiate(input).unwrap();
    assert_eq!(echo.text, "hello world");
}

/// Numbers at the edge of the structured representation.
#[derive(Debug, PartialEq)]
struct Big {
    n: u64,
    x: f32,
}

impl Describable for Big {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<u64>("n"), Param::of::<f32>("x")], |args| {
            Ok(Big {
                n: args.next()?,
                x: args.next()?,
            })
        })
        .accessor("n", |b| &b.n)
        .accessor("x", |b| &b.x);
    }
}

#[test]
fn numbers_out_of_range() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let err = marshaller
        .uninstantiate(&Big { n: u64::MAX, x: 0.0 })
        .unwrap_err();
    assert_eq!(
        err,
        Error::Coercion(CoercionError::OutOfRange {
            type_name: type_name::<Big>().into(),
            property: "n".into(),
            declared_type: "i64",
            value: u64::MAX.to_string(),
        })
    );

    let err = marshaller
        .instantiate::<Big>(map! { "n" => 1, "x" => 1e300 })
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Coercion(CoercionError::OutOfRange { declared_type: "f32", .. })
    ));

    let big: Big = marshaller
        .instantiate(map! { "n" => i64::MAX, "x" => 1.5 })
        .unwrap();
    assert_eq!(big, Big { n: i64::MAX as u64, x: 1.5 });
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Low,
    High,
}

crate::impl_constants!(Level {
    "LOW" => Level::Low,
    "HIGH" => Level::High,
});

struct Gauge {
    level: Level,
    link: Option<Url>,
    symbol: char,
}

impl Describable for Gauge {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<Level>("level")], |args| {
            Ok(Gauge {
                level: args.next()?,
                link: None,
                symbol: '\0',
            })
        })
        .accessor("level", |g| &g.level)
        .accessor("link", |g| &g.link)
        .accessor("symbol", |g| &g.symbol)
        .setter("set_link", |g, v| g.link = v)
        .setter("set_symbol", |g, v| g.symbol = v);
    }
}

#[test]
fn enums_urls_and_characters() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! {
        "level" => "HIGH",
        "link" => "http://nowhere.net/",
        "symbol" => "!",
    };
    let gauge: Gauge = marshaller.instantiate(input.clone()).unwrap();
    assert_eq!(gauge.level, Level::High);
    assert_eq!(gauge.link.as_ref().map(Url::as_str), Some("http://nowhere.net/"));
    assert_eq!(gauge.symbol, '!');
    assert_eq!(marshaller.uninstantiate(&gauge).unwrap(), input);

    let gauge: Gauge = marshaller.instantiate(map! { "level" => "LOW" }).unwrap();
    assert_eq!(gauge.link, None);
    assert_eq!(marshaller.uninstantiate(&gauge).unwrap(), map! { "level" => "LOW" });

    assert!(matches!(
        marshaller.instantiate::<Gauge>(map! { "level" => "low" }),
        Err(Error::Coercion(CoercionError::UnknownConstant { .. }))
    ));
    assert!(matches!(
        marshaller.instantiate::<Gauge>(map! { "level" => "LOW", "symbol" => "ab" }),
        Err(Error::Coercion(CoercionError::NotACharacter { .. }))
    ));
}

/// An optional constructor parameter.
struct Link {
    target: Option<Url>,
}

impl Describable for Link {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<Option<Url>>("target")], |args| {
            Ok(Link { target: args.next()? })
        })
        .accessor("target", |l| &l.target);
    }
}

#[test]
fn null_constructor_parameter_is_omitted() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let link: Link = marshaller.instantiate(map! {}).unwrap();
    assert!(link.target.is_none());
    assert_eq!(marshaller.uninstantiate(&link).unwrap(), map! {});

    let link: Link = marshaller
        .instantiate(map! { "target" => Value::Null })
        .unwrap();
    assert!(link.target.is_none());
}

// -----------------------------------------------------------------------------
// Nested values

struct Panel {
    toggle: Toggle,
}

impl Describable for Panel {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<Toggle>("toggle")], |args| {
            Ok(Panel { toggle: args.next()? })
        })
        .accessor("toggle", |p| &p.toggle);
    }
}

#[test]
fn concrete_nested_value() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! { "toggle" => map! { "flag" => true } };
    let panel: Panel = marshaller.instantiate(input.clone()).unwrap();
    assert!(panel.toggle.flag);
    assert_eq!(marshaller.uninstantiate(&panel).unwrap(), input);

    let input = map! { "toggle" => map! {} };
    let panel: Panel = marshaller.instantiate(input.clone()).unwrap();
    assert!(!panel.toggle.flag);
    assert_eq!(marshaller.uninstantiate(&panel).unwrap(), input);
}

struct Job {
    step: Arc<dyn Step>,
}

impl Describable for Job {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<Arc<dyn Step>>("step")], |args| {
            Ok(Job { step: args.next()? })
        })
        .accessor("step", |j| &j.step);
    }
}

#[test]
fn polymorphic_value() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! { "step" => map! { "$class" => "Echo", "text" => "hi" } };
    let job: Job = marshaller.instantiate(input.clone()).unwrap();
    assert_eq!(downcast::<Echo>(&job.step).unwrap().text, "hi");

    let output = marshaller.uninstantiate(&job).unwrap();
    assert_eq!(output, input);
    let step = output["step"].as_map().unwrap();
    assert_eq!(step.get_index(0).unwrap().0, "$class");
}

#[test]
fn fully_qualified_discriminator() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! { "step" => map! { "$class" => type_name::<Toggle>(), "flag" => true } };
    let job: Job = marshaller.instantiate(input).unwrap();
    assert!(downcast::<Toggle>(&job.step).unwrap().flag);

    // Unique short names are emitted short.
    assert_eq!(
        marshaller.uninstantiate(&job).unwrap(),
        map! { "step" => map! { "$class" => "Toggle", "flag" => true } }
    );
}

#[test]
fn resolution_failures() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let err = marshaller
        .instantiate::<Job>(map! { "step" => map! { "text" => "hi" } })
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::MissingDiscriminator { .. })
    ));

    let err = marshaller
        .instantiate::<Job>(map! { "step" => map! { "$class" => "Nope" } })
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::NotFound { .. })
    ));

    // A full path never falls back to the short name.
    let err = marshaller
        .instantiate::<Job>(map! { "step" => map! { "$class" => "wrong::Echo", "text" => "x" } })
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::NotFound { .. })
    ));

    let empty = SubtypeRegistry::new();
    let err = Marshaller::new(&empty)
        .instantiate::<Job>(map! { "step" => map! { "$class" => "Echo" } })
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::NotFound { .. })
    ));
}

#[test]
fn ambiguous_short_names() {
    let mut registry = registry();
    registry.register::<dyn Step, other::Echo>(|v| Arc::new(v));
    let marshaller = Marshaller::new(&registry);

    let err = registry.resolve::<dyn Step>("Echo").unwrap_err();
    assert_eq!(
        err,
        ResolutionError::Ambiguous {
            name: "Echo".into(),
            candidates: vec![type_name::<Echo>(), type_name::<other::Echo>()],
        }
    );
    assert!(
        registry
            .resolve::<dyn Step>(type_name::<other::Echo>())
            .is_ok()
    );

    // Ambiguous variants are emitted fully qualified.
    let job = Job {
        step: Arc::new(Echo { text: "hi".into() }),
    };
    let output = marshaller.uninstantiate(&job).unwrap();
    assert_eq!(
        output["step"].as_map().unwrap()["$class"],
        Value::from(type_name::<Echo>())
    );
    let again: Job = marshaller.instantiate(output).unwrap();
    assert_eq!(downcast::<Echo>(&again.step).unwrap().text, "hi");
}

#[test]
fn unregistered_runtime_type() {
    let registry = SubtypeRegistry::new();
    let marshaller = Marshaller::new(&registry);

    let job = Job {
        step: Arc::new(Toggle::default()),
    };
    assert!(matches!(
        marshaller.uninstantiate(&job),
        Err(Error::Resolution(ResolutionError::UnregisteredVariant { .. }))
    ));
}

// -----------------------------------------------------------------------------
// Collections

struct Bank {
    toggles: Box<[Toggle]>,
    spare: Vec<Toggle>,
    names: Vec<String>,
}

impl Describable for Bank {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<Box<[Toggle]>>("toggles")], |args| {
            Ok(Bank {
                toggles: args.next()?,
                spare: Vec::new(),
                names: Vec::new(),
            })
        })
        .accessor("toggles", |b| &b.toggles)
        .accessor("spare", |b| &b.spare)
        .accessor("names", |b| &b.names)
        .setter("set_spare", |b, v| b.spare = v)
        .setter("set_names", |b, v| b.names = v);
    }
}

#[test]
fn homogeneous_collections() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! {
        "toggles" => vec![map! {}, map! { "flag" => true }],
    };
    let bank: Bank = marshaller.instantiate(input.clone()).unwrap();
    let flags: Vec<bool> = bank.toggles.iter().map(|t| t.flag).collect();
    assert_eq!(flags, [false, true]);
    assert_eq!(marshaller.uninstantiate(&bank).unwrap(), input);

    let input = map! {
        "toggles" => Vec::<Map>::new(),
        "spare" => vec![map! { "flag" => true }],
        "names" => vec!["a", "b"],
    };
    let bank: Bank = marshaller.instantiate(input.clone()).unwrap();
    assert_eq!(bank.spare, [Toggle { flag: true }]);
    assert_eq!(bank.names, ["a", "b"]);
    assert_eq!(marshaller.uninstantiate(&bank).unwrap(), input);
}

struct Pipeline {
    steps: Vec<Arc<dyn Step>>,
}

impl Describable for Pipeline {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([Param::of::<Vec<Arc<dyn Step>>>("steps")], |args| {
            Ok(Pipeline { steps: args.next()? })
        })
        .accessor("steps", |p| &p.steps);
    }
}

#[test]
fn heterogeneous_collections() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let input = map! {
        "steps" => vec![
            map! { "$class" => "Echo", "text" => "hello" },
            map! { "$class" => "Toggle", "flag" => true },
        ],
    };
    let pipeline: Pipeline = marshaller.instantiate(input.clone()).unwrap();
    assert_eq!(pipeline.steps.len(), 2);
    assert_eq!(downcast::<Echo>(&pipeline.steps[0]).unwrap().text, "hello");
    assert!(downcast::<Toggle>(&pipeline.steps[1]).unwrap().flag);
    assert_eq!(marshaller.uninstantiate(&pipeline).unwrap(), input);
}

/// A collection property whose default is not empty.
struct Defaults {
    steps: Option<Vec<Arc<dyn Step>>>,
}

impl Describable for Defaults {
    fn describe(d: &mut Introspector<Self>) {
        d.designated([], |_| {
            let step: Arc<dyn Step> = Arc::new(Echo {
                text: "default".into(),
            });
            Ok(Defaults {
                steps: Some(vec![step]),
            })
        })
        .accessor("steps", |x| &x.steps)
        .setter("set_steps", |x, v| x.steps = v);
    }
}

#[test]
fn explicit_null_differs_from_default() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let defaults: Defaults = marshaller.instantiate(map! {}).unwrap();
    assert_eq!(defaults.steps.as_ref().map(Vec::len), Some(1));
    assert_eq!(marshaller.uninstantiate(&defaults).unwrap(), map! {});

    let input = map! { "steps" => Value::Null };
    let defaults: Defaults = marshaller.instantiate(input.clone()).unwrap();
    assert!(defaults.steps.is_none());
    assert_eq!(marshaller.uninstantiate(&defaults).unwrap(), input);

    let input = map! { "steps" => Vec::<Map>::new() };
    let defaults: Defaults = marshaller.instantiate(input.clone()).unwrap();
    assert_eq!(defaults.steps.as_ref().map(Vec::len), Some(0));
    assert_eq!(marshaller.uninstantiate(&defaults).unwrap(), input);
}

// -----------------------------------------------------------------------------
// Marshaller surface

#[test]
fn find_subtypes_per_capability() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let steps = marshaller.find_subtypes::<dyn Step>();
    assert_eq!(steps.len(), 2);
    assert!(steps.contains(&TypeId::of::<Echo>()));
    assert!(steps.contains(&TypeId::of::<Toggle>()));

    let markers = marshaller.find_subtypes::<dyn Marker>();
    assert_eq!(markers.len(), 1);
    assert!(markers.contains(&TypeId::of::<Echo>()));
}

#[test]
fn options_select_discriminator() {
    let registry = registry();
    let options = MarshalOptions::new()
        .with_discriminator("kind")
        .with_qualified(true);
    let marshaller = Marshaller::with_options(&registry, options);

    let input = map! { "step" => map! { "kind" => "Echo", "text" => "hi" } };
    let job: Job = marshaller.instantiate(input).unwrap();
    assert_eq!(
        marshaller.uninstantiate(&job).unwrap(),
        map! { "step" => map! { "kind" => type_name::<Echo>(), "text" => "hi" } }
    );
}

#[test]
fn standalone_values() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let value = Value::from(map! { "$class" => "Toggle", "flag" => true });
    let step: Arc<dyn Step> = marshaller.instantiate_value(value.clone()).unwrap();
    assert!(downcast::<Toggle>(&step).unwrap().flag);
    assert_eq!(marshaller.uninstantiate_value(&step).unwrap(), value);

    let err = marshaller
        .instantiate_value::<Toggle>(Value::from("flag"))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Coercion(CoercionError::TypeMismatch { .. })
    ));
}

#[test]
fn signatures() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    assert_eq!(
        marshaller.signature::<Pipeline>().unwrap(),
        "Pipeline(steps: Step{Echo(text: String) | Toggle(flag?: bool)}[])"
    );
    assert_eq!(
        marshaller.signature::<Gauge>().unwrap(),
        "Gauge(level: Level[LOW, HIGH], link?: Url, symbol?: char)"
    );
}

#[test]
fn json_round_trip() {
    let registry = registry();
    let marshaller = Marshaller::new(&registry);

    let json = r#"{"steps":[{"$class":"Echo","text":"hello"},{"$class":"Toggle","flag":true}]}"#;
    let input: Value = serde_json::from_str(json).unwrap();
    let Value::Map(input) = input else {
        panic!("expected a map");
    };
    let pipeline: Pipeline = marshaller.instantiate(input).unwrap();
    let output = marshaller.uninstantiate(&pipeline).unwrap();
    assert_eq!(serde_json::to_string(&Value::Map(output)).unwrap(), json);
}

#[cfg(feature = "auto_register")]
mod auto_register {
    use super::{Echo, Marker, Step, Toggle};
    use crate::registry::SubtypeRegistry;
    use core::any::TypeId;

    crate::submit_variants! {
        dyn Step => Echo, Toggle;
        dyn Marker => Echo;
    }

    #[test]
    fn collects_submitted_variants() {
        let mut registry = SubtypeRegistry::new();
        assert!(registry.auto_register());
        assert!(registry.auto_register());
        assert_eq!(registry.variants::<dyn Step>().len(), 2);
        assert_eq!(
            registry.resolve::<dyn Marker>("Echo").unwrap().type_id(),
            TypeId::of::<Echo>()
        );
    }
}
