use std::fmt::Write as _;

use serde_json::Value;

use crate::generator::model::{Field, Import, Model, ModelKind};

const INDENT: &str = "    ";
const COMPOSITE_BASE: &str = "BaseModel";
const ENUMERATION_BASE: &str = "Enum";

/// Renders one model into its source body. Template selection is the renderer's
/// concern; assembly only joins the bodies.
pub trait ModelRenderer {
  fn render(&self, model: &Model) -> String;

  /// Imports the rendered body relies on beyond the model's own.
  fn imports(&self, _model: &Model) -> Vec<Import> {
    vec![]
  }
}

/// Class-style bodies: pydantic models for composites, `Enum` subclasses for
/// enumerations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassRenderer;

impl ClassRenderer {
  fn bases(model: &Model) -> String {
    if model.base_classes.is_empty() {
      match model.kind {
        ModelKind::Composite => COMPOSITE_BASE.to_string(),
        ModelKind::Enumeration => ENUMERATION_BASE.to_string(),
      }
    } else {
      model.base_classes.join(", ")
    }
  }

  fn render_field(field: &Field) -> String {
    let hint = field.data_type.type_hint();
    let annotation = if field.required {
      hint
    } else {
      format!("Optional[{hint}]")
    };

    let default = match (&field.default, field.required) {
      (Some(value), _) => Some(python_literal(value)),
      (None, false) if !field.strip_default_none => Some("None".to_string()),
      (None, false) => None,
      (None, true) => field.alias.as_ref().map(|_| "...".to_string()),
    };

    match (&field.alias, default) {
      (Some(alias), Some(default)) => {
        format!("{}: {annotation} = Field({default}, alias={})", field.name, python_string(alias))
      }
      (Some(alias), None) => format!("{}: {annotation} = Field(alias={})", field.name, python_string(alias)),
      (None, Some(default)) => format!("{}: {annotation} = {default}", field.name),
      (None, None) => format!("{}: {annotation}", field.name),
    }
  }

  fn render_member(field: &Field) -> String {
    let value = field
      .default
      .as_ref()
      .map_or_else(|| python_string(&field.name), python_literal);
    format!("{} = {value}", field.name)
  }
}

impl ModelRenderer for ClassRenderer {
  fn render(&self, model: &Model) -> String {
    let mut body = format!("class {}({}):", model.name, Self::bases(model));

    if let Some(description) = model.description.as_deref().filter(|text| !text.is_empty()) {
      let _ = write!(body, "\n{INDENT}\"\"\"\n");
      for line in description.lines() {
        if line.is_empty() {
          body.push('\n');
        } else {
          let _ = writeln!(body, "{INDENT}{line}");
        }
      }
      let _ = write!(body, "{INDENT}\"\"\"");
    }

    let lines: Vec<String> = match model.kind {
      ModelKind::Composite => model.fields.iter().map(Self::render_field).collect(),
      ModelKind::Enumeration => model.fields.iter().map(Self::render_member).collect(),
    };

    if lines.is_empty() {
      if model.description.as_deref().is_none_or(str::is_empty) {
        let _ = write!(body, "\n{INDENT}pass");
      }
    } else {
      if model.description.as_deref().is_some_and(|text| !text.is_empty()) {
        body.push('\n');
      }
      for line in lines {
        let _ = write!(body, "\n{INDENT}{line}");
      }
    }

    body
  }

  fn imports(&self, model: &Model) -> Vec<Import> {
    let mut imports = vec![];
    if model.base_classes.is_empty() {
      imports.push(match model.kind {
        ModelKind::Composite => Import::from_module("pydantic", COMPOSITE_BASE),
        ModelKind::Enumeration => Import::from_module("enum", ENUMERATION_BASE),
      });
    }
    if model.kind == ModelKind::Composite {
      if model.fields.iter().any(|field| !field.required) {
        imports.push(Import::from_module("typing", "Optional"));
      }
      if model.fields.iter().any(|field| field.alias.is_some()) {
        imports.push(Import::from_module("pydantic", "Field"));
      }
    }
    imports
  }
}

fn python_string(value: &str) -> String {
  let escaped = value.replace('\\', "\\\\").replace('\'', "\\'").replace('\n', "\\n");
  format!("'{escaped}'")
}

/// Python literal for a JSON default value.
pub fn python_literal(value: &Value) -> String {
  match value {
    Value::Null => "None".to_string(),
    Value::Bool(true) => "True".to_string(),
    Value::Bool(false) => "False".to_string(),
    Value::Number(number) => number.to_string(),
    Value::String(text) => python_string(text),
    Value::Array(items) => format!("[{}]", items.iter().map(python_literal).collect::<Vec<_>>().join(", ")),
    Value::Object(map) => {
      let entries: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{}: {}", python_string(key), python_literal(value)))
        .collect();
      format!("{{{}}}", entries.join(", "))
    }
  }
}
