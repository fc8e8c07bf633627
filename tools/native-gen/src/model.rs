//! Intermediate representation for native declarations

use serde::{Deserialize, Serialize};

/// Complete native model extracted from declaration files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeModel {
    pub natives: Vec<NativeFunction>,
    pub categories: Vec<Category>,
}

/// Single native declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeFunction {
    pub name: String,
    pub namespace: u32,
    pub hash: u32,
    pub params: Vec<Parameter>,
    pub outputs: Vec<Output>,
    pub doc_comment: String,
    pub category: String,
}

impl NativeFunction {
    /// Name of the generated identifier constant.
    pub fn const_name(&self) -> String {
        self.name.to_uppercase()
    }

    /// Rust type the generated wrapper returns inside `Result`.
    pub fn value_type(&self) -> String {
        match self.outputs.as_slice() {
            [] => "()".to_string(),
            [single] => single.kind.value_type().to_string(),
            many => {
                let types: Vec<_> = many.iter().map(|o| o.kind.value_type()).collect();
                format!("({})", types.join(", "))
            }
        }
    }

    /// Output set named in the generated `call::<...>()`.
    pub fn output_set(&self) -> String {
        match self.outputs.as_slice() {
            [] => "()".to_string(),
            [single] => single.marker(),
            many => {
                let markers: Vec<_> = many.iter().map(Output::marker).collect();
                format!("({})", markers.join(", "))
            }
        }
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub ty: ParamType,
}

/// Declared parameter type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamType {
    Int { rust_type: String },
    Bool,
    Float,
    Str,
    Vector,
    /// Name passed as its runtime hash
    Hash,
    FuncRef,
    Object,
    InOutInt,
    InOutFloat,
}

impl ParamType {
    /// Map a simple declared type name; references, generics and
    /// `InOut<T>` are resolved by the parser.
    pub fn from_ident(ident: &str) -> Option<Self> {
        let ty = match ident {
            "i8" | "i16" | "i32" | "i64" | "u8" | "u16" | "u32" | "u64" => ParamType::Int {
                rust_type: ident.to_string(),
            },
            "bool" => ParamType::Bool,
            "f32" => ParamType::Float,
            "Vector3" => ParamType::Vector,
            "Hash" => ParamType::Hash,
            "FuncRef" => ParamType::FuncRef,
            "Object" => ParamType::Object,
            _ => return None,
        };
        Some(ty)
    }

    /// Parameter type of the generated wrapper.
    pub fn wrapper_type(&self) -> &str {
        match self {
            ParamType::Int { rust_type } => rust_type,
            ParamType::Bool => "bool",
            ParamType::Float | ParamType::InOutFloat => "f32",
            ParamType::Str | ParamType::Hash => "&str",
            ParamType::Vector => "Vector3",
            ParamType::FuncRef => "&CallbackHandle",
            ParamType::Object => "&StructuredObject",
            ParamType::InOutInt => "i32",
        }
    }

    /// Output kind an in/out parameter places in the frame.
    pub fn in_out_kind(&self) -> Option<OutputKind> {
        match self {
            ParamType::InOutInt => Some(OutputKind::Int),
            ParamType::InOutFloat => Some(OutputKind::Float),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputRole {
    Return,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Any,
    Int,
    Float,
    Long,
    Str,
    Bool,
    Vector,
    Object,
}

impl OutputKind {
    pub fn from_ident(ident: &str) -> Option<Self> {
        let kind = match ident {
            "Any" => OutputKind::Any,
            "Int" => OutputKind::Int,
            "Float" => OutputKind::Float,
            "Long" => OutputKind::Long,
            "Str" => OutputKind::Str,
            "Bool" => OutputKind::Bool,
            "Vector" => OutputKind::Vector,
            "Object" => OutputKind::Object,
            _ => return None,
        };
        Some(kind)
    }

    pub fn ident(self) -> &'static str {
        match self {
            OutputKind::Any => "Any",
            OutputKind::Int => "Int",
            OutputKind::Float => "Float",
            OutputKind::Long => "Long",
            OutputKind::Str => "Str",
            OutputKind::Bool => "Bool",
            OutputKind::Vector => "Vector",
            OutputKind::Object => "Object",
        }
    }

    /// Decoded Rust type.
    pub fn value_type(self) -> &'static str {
        match self {
            OutputKind::Any => "RawSlot",
            OutputKind::Int => "i32",
            OutputKind::Float => "f32",
            OutputKind::Long => "u64",
            OutputKind::Str => "Option<String>",
            OutputKind::Bool => "bool",
            OutputKind::Vector => "Vector3",
            OutputKind::Object => "serde_json::Value",
        }
    }
}

/// One declared output marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub role: OutputRole,
    pub kind: OutputKind,
}

impl Output {
    pub fn marker(&self) -> String {
        let wrapper = match self.role {
            OutputRole::Return => "Ret",
            OutputRole::Pointer => "Out",
        };
        format!("{}<kind::{}>", wrapper, self.kind.ident())
    }
}

/// Native category for organization (one per declaration file)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub comment: String,
}
