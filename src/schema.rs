//! Response schema owned by the generation adapter.
//!
//! The shape is a static table ([`SECTIONS`]); the JSON schema sent to the
//! service and the conformance check applied to its answer are both derived
//! from that table, so they cannot disagree. Bump
//! [`RESPONSE_SCHEMA_VERSION`] whenever the table changes.

use serde_json::{json, Map, Value};
use std::sync::OnceLock;

pub const RESPONSE_SCHEMA_VERSION: &str = "rpm-response/1";

/// JSON type of a leaf member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    String,
    Number,
}

impl MemberKind {
    fn schema_type(self) -> &'static str {
        match self {
            MemberKind::String => "STRING",
            MemberKind::Number => "NUMBER",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            MemberKind::String => value.is_string(),
            MemberKind::Number => value.is_number(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            MemberKind::String => "string",
            MemberKind::Number => "number",
        }
    }
}

pub type Members = &'static [(&'static str, MemberKind)];

/// Shape of a top-level section.
#[derive(Debug, Clone, Copy)]
pub enum SectionShape {
    Object(Members),
    ArrayOf(Members),
}

use MemberKind::{Number, String as Str};

pub const SECTIONS: &[(&str, SectionShape)] = &[
    (
        "identitas",
        SectionShape::Object(&[
            ("schoolName", Str),
            ("subject", Str),
            ("gradeSemester", Str),
            ("duration", Str),
        ]),
    ),
    (
        "identifikasi",
        SectionShape::Object(&[("siswa", Str), ("materi", Str), ("dimensi", Str)]),
    ),
    (
        "desain",
        SectionShape::Object(&[
            ("cp", Str),
            ("lintasDisiplin", Str),
            ("tp", Str),
            ("topik", Str),
            ("pedagogis", Str),
            ("kemitraan", Str),
            ("lingkungan", Str),
            ("digital", Str),
        ]),
    ),
    (
        "pengalaman",
        SectionShape::ArrayOf(&[
            ("sessionNumber", Number),
            ("pedagogicalPractice", Str),
            ("tag", Str),
            ("memahami", Str),
            ("mengaplikasi", Str),
            ("refleksi", Str),
        ]),
    ),
    (
        "asesmen",
        SectionShape::Object(&[("awal", Str), ("proses", Str), ("akhir", Str)]),
    ),
];

/// Names of the required top-level members, in schema order.
pub fn required_members() -> Vec<&'static str> {
    SECTIONS.iter().map(|(name, _)| *name).collect()
}

/// The response schema declared on every generation call. Built once.
pub fn response_schema() -> &'static Value {
    static SCHEMA: OnceLock<Value> = OnceLock::new();
    SCHEMA.get_or_init(build_schema)
}

fn object_schema(members: Members) -> Value {
    let properties: Map<String, Value> = members
        .iter()
        .map(|(name, kind)| (name.to_string(), json!({ "type": kind.schema_type() })))
        .collect();
    let required: Vec<&str> = members.iter().map(|(name, _)| *name).collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
    })
}

fn build_schema() -> Value {
    let properties: Map<String, Value> = SECTIONS
        .iter()
        .map(|(name, shape)| {
            let schema = match *shape {
                SectionShape::Object(members) => object_schema(members),
                SectionShape::ArrayOf(members) => json!({
                    "type": "ARRAY",
                    "items": object_schema(members),
                }),
            };
            (name.to_string(), schema)
        })
        .collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required_members(),
    })
}

fn check_object(path: &str, value: &Value, members: Members, problems: &mut Vec<String>) {
    let Some(object) = value.as_object() else {
        problems.push(format!("{} is not an object", path));
        return;
    };
    for (name, kind) in members {
        match object.get(*name) {
            None | Some(Value::Null) => problems.push(format!("{}.{} is missing", path, name)),
            Some(member) if !kind.matches(member) => problems.push(format!(
                "{}.{} is not a {}",
                path,
                name,
                kind.describe()
            )),
            Some(_) => {}
        }
    }
}

/// Every way `value` deviates from the schema, as member paths. Empty when
/// the document conforms. Extra members are ignored.
pub fn check_conformance(value: &Value) -> Vec<String> {
    let mut problems = Vec::new();
    let Some(root) = value.as_object() else {
        problems.push("response is not an object".to_string());
        return problems;
    };
    for (name, shape) in SECTIONS {
        let member = match root.get(*name) {
            None | Some(Value::Null) => {
                problems.push(format!("{} is missing", name));
                continue;
            }
            Some(member) => member,
        };
        match *shape {
            SectionShape::Object(members) => check_object(name, member, members, &mut problems),
            SectionShape::ArrayOf(members) => match member.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        check_object(&format!("{}[{}]", name, i), item, members, &mut problems);
                    }
                }
                None => problems.push(format!("{} is not an array", name)),
            },
        }
    }
    problems
}
