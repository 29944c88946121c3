use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A type expression used by parameters, properties, bodies and responses
///
/// `is_shared` marks a reference to a [`SharedType`](super::SharedType) of the
/// owning data source by `type_name`. `template_index` refers to the n-th
/// template argument of the enclosing shared type and takes precedence over
/// `type_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    #[serde(default)]
    pub type_name: String,

    #[serde(default)]
    pub is_shared: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<DataType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_index: Option<usize>,
}

impl DataType {
    pub fn primitive(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            ..Self::default()
        }
    }

    pub fn shared(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            is_shared: true,
            ..Self::default()
        }
    }

    /// `Array<item>`
    pub fn array_of(item: DataType) -> Self {
        Self::primitive("Array").with_args(vec![item])
    }

    pub fn template(index: usize) -> Self {
        Self {
            template_index: Some(index),
            ..Self::default()
        }
    }

    pub fn with_args(mut self, args: Vec<DataType>) -> Self {
        self.type_args = args;
        self
    }

    /// Every shared type name this expression mentions, recursively
    pub fn referenced_shared_types(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_shared_types(&mut out);
        out
    }

    pub(crate) fn collect_shared_types(&self, out: &mut BTreeSet<String>) {
        if self.is_shared && self.template_index.is_none() && !self.type_name.is_empty() {
            out.insert(self.type_name.clone());
        }
        for arg in &self.type_args {
            arg.collect_shared_types(out);
        }
    }

    /// Render as a TypeScript type. Shared types are qualified with
    /// `defs_ns`; template slots resolve against `templates`.
    pub fn render(&self, defs_ns: &str, templates: &[String]) -> String {
        if let Some(idx) = self.template_index {
            return templates
                .get(idx)
                .cloned()
                .unwrap_or_else(|| format!("T{}", idx));
        }

        let base = if self.is_shared {
            format!("{}.{}", defs_ns, self.type_name)
        } else {
            ts_primitive(&self.type_name).to_string()
        };

        if self.type_args.is_empty() {
            return base;
        }
        let args: Vec<String> = self
            .type_args
            .iter()
            .map(|a| a.render(defs_ns, templates))
            .collect();
        format!("{}<{}>", base, args.join(", "))
    }
}

fn ts_primitive(type_name: &str) -> &str {
    match type_name {
        "" => "any",
        "integer" | "int" | "long" | "float" | "double" => "number",
        "file" => "File",
        other => other,
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(idx) = self.template_index {
            return write!(f, "T{}", idx);
        }
        let name = if self.type_name.is_empty() {
            "any"
        } else {
            &self.type_name
        };
        write!(f, "{}", name)?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}
