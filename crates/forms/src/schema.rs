//! Declared fields of a form.

use crate::form::FormData;
use crate::rules::Rule;

/// How a field's string value is sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Decimal amount; sent as a JSON number.
    Number,
    /// Whole number or foreign key; sent as a JSON integer.
    Integer,
    /// `YYYY-MM-DD`.
    Date,
    Boolean,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Client (camelCase) field name.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub initial: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            initial: "",
            rules: Vec::new(),
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    /// Numeric fields carry the numeric rule implicitly.
    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number).rule(Rule::Numeric)
    }

    pub fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer).rule(Rule::Numeric)
    }

    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date).rule(Rule::Date)
    }

    pub fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Boolean).initial("false")
    }

    pub fn initial(mut self, value: &'static str) -> Self {
        self.initial = value;
        self
    }

    /// Rules run in declaration order, with `Required` always first.
    pub fn rule(mut self, rule: Rule) -> Self {
        if rule == Rule::Required {
            self.rules.insert(0, rule);
        } else {
            self.rules.push(rule);
        }
        self
    }

    pub fn required(self) -> Self {
        self.rule(Rule::Required)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn initial_data(&self) -> FormData {
        self.fields
            .iter()
            .map(|f| (f.name.to_string(), f.initial.to_string()))
            .collect()
    }

    /// First failing rule of `spec` against the current data.
    pub fn check_field(&self, spec: &FieldSpec, data: &FormData) -> Option<String> {
        let value = data.get(spec.name).map(String::as_str).unwrap_or("");
        spec.rules.iter().find_map(|rule| rule.check(spec, value, data, self))
    }
}
