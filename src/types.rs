//! Typed values shared by the tool handlers.

use std::fmt;

/// Greeting language supported by `get_hello`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

impl Language {
    /// All supported languages, in the order they are advertised.
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::Fr];

    /// Parse a language code, falling back to English for anything unrecognized.
    ///
    /// Unknown codes are not an error: callers asking for an unsupported
    /// language still get a greeting.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Language::En,
            "es" => Language::Es,
            "fr" => Language::Fr,
            _ => Language::En,
        }
    }

    /// The ISO 639-1 code for this language.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    /// Render the greeting for `name` in this language.
    pub fn greet(&self, name: &str) -> String {
        match self {
            Language::En => format!("Hello, {}!", name),
            Language::Es => format!("¡Hola, {}!", name),
            Language::Fr => format!("Bonjour, {}!", name),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
