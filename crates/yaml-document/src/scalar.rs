/// The style a scalar was written in, required to distinguish `"true"` the
/// string from `true` the boolean: only `Plain` scalars undergo type inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    Plain,
    SingleQuoted,
    DoubleQuoted,
    Literal,
    Folded,
}

/// The YAML 1.1 vs 1.2 core schema differ in which plain scalars count as
/// booleans; `yamlVersion` in the editor configuration selects between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YamlVersion {
    #[default]
    V1_2,
    V1_1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
}

/// Infer the type of a *plain* scalar per `spec.md` §3. Quoted scalars are
/// always `String` and must not be passed here (callers gate on
/// [`ScalarStyle::Plain`] first).
pub fn infer_plain_type(value: &str, version: YamlVersion) -> InferredType {
    if is_null(value) {
        return InferredType::Null;
    }
    if is_boolean(value, version) {
        return InferredType::Boolean;
    }
    if is_integer(value) {
        return InferredType::Integer;
    }
    if is_float(value) {
        return InferredType::Float;
    }
    InferredType::String
}

fn is_null(value: &str) -> bool {
    matches!(value, "null" | "Null" | "NULL" | "~" | "")
}

fn is_boolean(value: &str, version: YamlVersion) -> bool {
    match version {
        YamlVersion::V1_2 => matches!(value, "true" | "True" | "TRUE" | "false" | "False" | "FALSE"),
        YamlVersion::V1_1 => matches!(
            value,
            "true" | "True" | "TRUE" | "false" | "False" | "FALSE"
                | "yes" | "Yes" | "YES" | "no" | "No" | "NO"
                | "on" | "On" | "ON" | "off" | "Off" | "OFF"
                | "y" | "Y" | "n" | "N"
        ),
    }
}

fn is_integer(value: &str) -> bool {
    let stripped = value.strip_prefix(['-', '+']).unwrap_or(value);
    if let Some(octal) = stripped.strip_prefix("0o") {
        return !octal.is_empty() && octal.bytes().all(|b| (b'0'..=b'7').contains(&b));
    }
    if let Some(hex) = stripped.strip_prefix("0x") {
        return !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit())
}

fn is_float(value: &str) -> bool {
    if matches!(value, ".inf" | "-.inf" | "+.inf" | ".Inf" | "-.Inf" | ".INF" | "-.INF" | ".nan" | ".NaN" | ".NAN") {
        return true;
    }
    let stripped = value.strip_prefix(['-', '+']).unwrap_or(value);
    if stripped.is_empty() || stripped == "." {
        return false;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;
    let mut chars = stripped.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot && !seen_exp => seen_dot = true,
            'e' | 'E' if !seen_exp && seen_digit => {
                seen_exp = true;
                if let Some(&(_, next)) = chars.peek() {
                    if next == '+' || next == '-' {
                        chars.next();
                    }
                }
            }
            _ => {
                let _ = i;
                return false;
            }
        }
    }
    seen_digit && (seen_dot || seen_exp)
}
