//! Shared bound types and fixtures for engine tests.

#![allow(dead_code)]

use bindery::{
    BindingEntry, Bound, BoundExt, BoundType, Field, FieldValue, NestedType, Result, Schema,
    SchemaRegistry, TypeDescriptor, list_of, nested,
};
use serde_json::{Value, json};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Installs a test subscriber honouring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ── Student ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Student {
    pub full_name: String,
    pub age: f64,
    pub is_male: bool,
    pub roles: Vec<String>,
    pub jobs: BTreeMap<String, Vec<String>>,
    pub highscores: Vec<f64>,
}

bindery::bound!(Student { full_name, age, is_male, roles, jobs, highscores });

fn student_schema() -> Schema {
    Schema::builder("Student")
        .field("full_name", BindingEntry::text("profile.full_name"))
        .field("age", BindingEntry::number("profile.age"))
        .field("is_male", BindingEntry::boolean("others.is_male"))
        .field("roles", BindingEntry::list_of("others.roles", TypeDescriptor::TEXT))
        .field("jobs", BindingEntry::map_of("jobs", list_of(TypeDescriptor::TEXT)))
        .field("highscores", BindingEntry::list_of("highscores", TypeDescriptor::NUMBER))
        .build()
}

pub fn default_jobs() -> BTreeMap<String, Vec<String>> {
    BTreeMap::from([("2023".to_string(), vec!["2023".to_string()])])
}

impl Student {
    pub fn new() -> Result<Self> {
        SchemaRegistry::global().attach_with::<Student>(student_schema)?;
        Ok(Self {
            full_name: "noname".to_string(),
            age: -1.0,
            is_male: false,
            roles: vec!["100".to_string()],
            jobs: default_jobs(),
            highscores: Vec::new(),
        })
    }

    /// Asserts every field holds the constructor's value.
    pub fn assert_defaults(&self) {
        assert_eq!(self.full_name, "noname");
        assert_eq!(self.age, -1.0);
        assert!(!self.is_male);
        assert_eq!(self.roles, vec!["100".to_string()]);
        assert_eq!(self.jobs, default_jobs());
    }

    /// Asserts every field holds the values of [`json1`].
    pub fn assert_json1(&self) {
        assert_eq!(self.full_name, "John Smith");
        assert_eq!(self.age, 12.0);
        assert!(self.is_male);
        assert_eq!(self.roles, vec!["1", "2", "2a", "2b"]);
        assert_eq!(
            self.jobs,
            BTreeMap::from([
                ("2021".to_string(), vec!["A".to_string(), "B".to_string(), "C".to_string()]),
                ("2025".to_string(), vec!["B".to_string(), "D".to_string()]),
            ])
        );
        assert_eq!(self.highscores, vec![10.0, 9.5, 8.75]);
    }
}

impl BoundType for Student {
    fn from_tree(raw: &Value) -> Result<Self> {
        let mut student = Self::new()?;
        student.decode(raw)?;
        Ok(student)
    }
}

// ── Student without jobs on the wire ─────────────────────────────

#[derive(Debug, Clone)]
pub struct StudentIgnoreJob {
    pub full_name: String,
    pub age: f64,
    pub is_male: bool,
    pub roles: Vec<String>,
    pub jobs: Value,
}

bindery::bound!(StudentIgnoreJob { full_name, age, is_male, roles, jobs });

impl StudentIgnoreJob {
    pub fn new() -> Result<Self> {
        SchemaRegistry::global().attach_with::<StudentIgnoreJob>(|| {
            Schema::builder("StudentIgnoreJob")
                .field("full_name", BindingEntry::text("profile.full_name"))
                .field("age", BindingEntry::number("profile.age"))
                .field("is_male", BindingEntry::boolean("others.is_male"))
                .field("roles", BindingEntry::list_of("others.roles", TypeDescriptor::TEXT))
                .field("jobs", BindingEntry::object("jobs").ignore_on_encode())
                .build()
        })?;
        Ok(Self {
            full_name: "noname".to_string(),
            age: -1.0,
            is_male: false,
            roles: vec!["100".to_string()],
            jobs: json!({"2023": ["2023"]}),
        })
    }
}

// ── ClassRoom: nested, list of nested, map of nested ─────────────

#[derive(Debug, Clone)]
pub struct ClassRoom {
    pub monitor: Student,
    pub students: Vec<Student>,
    pub map_students: BTreeMap<String, Student>,
}

bindery::bound!(ClassRoom { monitor, students, map_students });

impl ClassRoom {
    pub fn new() -> Result<Self> {
        SchemaRegistry::global().attach_with::<ClassRoom>(|| {
            Schema::builder("ClassRoom")
                .field("monitor", BindingEntry::nested::<Student>("class_monitor"))
                .field("students", BindingEntry::list_of("my_student", nested::<Student>()))
                .field("map_students", BindingEntry::map_of("map_student", nested::<Student>()))
                .build()
        })?;
        Ok(Self {
            monitor: Student::new()?,
            students: Vec::new(),
            map_students: BTreeMap::new(),
        })
    }
}

// ── Untyped scalars, for lenient coercion ────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Loose {
    pub number: f64,
    pub string: String,
    pub boolean: bool,
    pub object: Value,
    pub array: Vec<Value>,
}

bindery::bound!(Loose { number, string, boolean, object, array });

impl Loose {
    pub fn new() -> Result<Self> {
        SchemaRegistry::global().attach_with::<Loose>(|| {
            Schema::builder("Loose")
                .field("number", BindingEntry::number("number"))
                .field("string", BindingEntry::text("string"))
                .field("boolean", BindingEntry::boolean("boolean"))
                .field("object", BindingEntry::object("object"))
                .field("array", BindingEntry::list("array"))
                .build()
        })?;
        Ok(Self {
            object: json!({}),
            ..Self::default()
        })
    }
}

// ── Root-bound list ──────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ArrayNumber {
    pub numbers: Vec<f64>,
}

bindery::bound!(ArrayNumber { numbers });

impl ArrayNumber {
    pub fn new() -> Result<Self> {
        SchemaRegistry::global().attach_with::<ArrayNumber>(|| {
            Schema::builder("ArrayNumber")
                .field("numbers", BindingEntry::list_of("", TypeDescriptor::NUMBER))
                .build()
        })?;
        Ok(Self::default())
    }
}

// ── Recursive type ───────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CompositeItem {
    pub name: String,
    pub children: Vec<CompositeItem>,
}

bindery::bound!(CompositeItem { name, children });

impl BoundType for CompositeItem {
    fn from_tree(raw: &Value) -> Result<Self> {
        SchemaRegistry::global().attach_with::<CompositeItem>(|| {
            Schema::builder("CompositeItem")
                .field("name", BindingEntry::text("name"))
                .field("children", BindingEntry::list_of("children", nested::<CompositeItem>()))
                .build()
        })?;
        let mut item = Self::default();
        item.decode(raw)?;
        Ok(item)
    }
}

// ── Discriminated people ─────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Tutor {
    pub kind: String,
    pub name: String,
    pub age: f64,
}

bindery::bound!(Tutor { kind, name, age });

impl BoundType for Tutor {
    fn from_tree(raw: &Value) -> Result<Self> {
        SchemaRegistry::global().attach_with::<Tutor>(|| {
            Schema::builder("Tutor")
                .field("kind", BindingEntry::text("type"))
                .field("name", BindingEntry::text("name"))
                .field("age", BindingEntry::number("age"))
                .build()
        })?;
        let mut tutor = Self::default();
        tutor.decode(raw)?;
        Ok(tutor)
    }
}

/// Same fields as [`Tutor`], but the discriminator stays off the wire.
#[derive(Debug, Clone, Default)]
pub struct Pupil {
    pub kind: String,
    pub name: String,
    pub age: f64,
}

bindery::bound!(Pupil { kind, name, age });

impl BoundType for Pupil {
    fn from_tree(raw: &Value) -> Result<Self> {
        SchemaRegistry::global().attach_with::<Pupil>(|| {
            Schema::builder("Pupil")
                .field("kind", BindingEntry::text("type").ignore_on_encode())
                .field("name", BindingEntry::text("name"))
                .field("age", BindingEntry::number("age"))
                .build()
        })?;
        let mut pupil = Self::default();
        pupil.decode(raw)?;
        Ok(pupil)
    }
}

/// The closed set of people a class can hold, picked by the `type` field.
#[derive(Debug, Clone)]
pub enum Member {
    Tutor(Tutor),
    Pupil(Pupil),
}

impl Member {
    /// Factory for nested member fields.
    pub fn construct(raw: &Value) -> Result<Box<dyn Bound>> {
        let member = match raw.get("type").and_then(Value::as_str) {
            Some("tutor") => Member::Tutor(Tutor::from_tree(raw)?),
            _ => Member::Pupil(Pupil::from_tree(raw)?),
        };
        Ok(Box::new(member))
    }

    pub fn descriptor() -> TypeDescriptor {
        TypeDescriptor::Nested(NestedType::with_factory("Member", Member::construct))
    }

    fn inner(&self) -> &dyn Bound {
        match self {
            Member::Tutor(t) => t,
            Member::Pupil(p) => p,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Bound {
        match self {
            Member::Tutor(t) => t,
            Member::Pupil(p) => p,
        }
    }
}

impl Bound for Member {
    fn type_name(&self) -> &'static str {
        self.inner().type_name()
    }

    fn schema(&self) -> Arc<Schema> {
        self.inner().schema()
    }

    fn field(&self, name: &str) -> FieldValue {
        self.inner().field(name)
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> bool {
        self.inner_mut().set_field(name, value)
    }

    fn clone_box(&self) -> Box<dyn Bound> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl Field for Member {
    fn to_field(&self) -> FieldValue {
        FieldValue::Bound(Box::new(self.clone()))
    }

    fn from_field(value: FieldValue) -> Option<Self> {
        match value {
            FieldValue::Bound(b) => b.into_any().downcast::<Member>().ok().map(|m| *m),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MyClassRoom {
    pub name: String,
    pub tutor: Option<Member>,
    pub students: Vec<Member>,
}

bindery::bound!(MyClassRoom { name, tutor, students });

impl BoundType for MyClassRoom {
    fn from_tree(raw: &Value) -> Result<Self> {
        SchemaRegistry::global().attach_with::<MyClassRoom>(|| {
            Schema::builder("MyClassRoom")
                .field("name", BindingEntry::text("name"))
                .field("tutor", BindingEntry::new("tutor", Member::descriptor()))
                .field("students", BindingEntry::list_of("students", Member::descriptor()))
                .build()
        })?;
        let mut room = Self {
            name: String::new(),
            tutor: None,
            students: Vec::new(),
        };
        room.decode(raw)?;
        Ok(room)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────

pub fn json1() -> Value {
    json!({
        "profile": {"full_name": "John Smith", "age": 12},
        "others": {"is_male": true, "roles": ["1", "2", "2a", "2b"]},
        "jobs": {"2021": ["A", "B", "C"], "2025": ["B", "D"]},
        "highscores": [10, 9.5, 8.75]
    })
}

pub fn json3() -> Value {
    json!({
        "profile": {"full_name": 1, "age": "12a"},
        "others": {"is_male": 5, "roles": "ABCDE"},
        "jobs": true
    })
}

pub fn json4() -> Value {
    json!({
        "my_student": [json1(), null, json3()],
        "class_monitor": json1(),
        "map_student": {"json1": json1(), "json2": null, "json3": json3()}
    })
}

/// What a default-initialized [`Student`] encodes to.
pub fn default_student_json() -> Value {
    json!({
        "profile": {"full_name": "noname", "age": -1},
        "others": {"is_male": false, "roles": ["100"]},
        "jobs": {"2023": ["2023"]},
        "highscores": []
    })
}

pub fn composite_json() -> Value {
    json!({
        "name": "parent",
        "children": [
            {"name": "child_1", "children": []},
            {"name": "child_2", "children": []},
            {
                "name": "child_3",
                "children": [
                    {"name": "child_3_1", "children": []},
                    {"name": "child_3_2", "children": []}
                ]
            }
        ]
    })
}

pub fn class_json() -> Value {
    json!({
        "name": "My Class",
        "tutor": {"type": "tutor", "name": "Nguyen Van A", "age": 30},
        "students": [
            {"name": "nguyen van A", "age": 12},
            {"name": "nguyen van B", "age": 17}
        ]
    })
}

// ── Ledger ───────────────────────────────────────────────────────

/// Wide integer identifiers, typed and inside untyped data.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub id: u64,
    pub meta: Value,
}

bindery::bound!(Ledger { id, meta });

impl BoundType for Ledger {
    fn from_tree(raw: &Value) -> Result<Self> {
        SchemaRegistry::global().attach_with::<Ledger>(|| {
            Schema::builder("Ledger")
                .field("id", BindingEntry::number("id"))
                .field("meta", BindingEntry::object("meta"))
                .build()
        })?;
        let mut ledger = Self::default();
        ledger.decode(raw)?;
        Ok(ledger)
    }
}
