// Used in both Token and Ast

/// Variable names are stored uppercase. A trailing `$` makes a string name.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Ident {
    Plain(String),
    String(String),
}

impl Ident {
    pub fn new(name: &str) -> Ident {
        let name = name.to_ascii_uppercase();
        if name.ends_with('$') {
            Ident::String(name)
        } else {
            Ident::Plain(name)
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Ident::Plain(s) | Ident::String(s) => s,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Ident::String(_))
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
