use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

// `\w` in the published schema is the ASCII word class, hence `[A-Za-z0-9_]`
static LIST_NAME: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[A-Za-z0-9_ ]+$"));
static TAG_ID: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[A-Za-z0-9_]+$"));
static TAG_NAME: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[ A-Za-z0-9_]+$"));
static TAG_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[ A-Za-z0-9_\.,:]+$"));
static TOKEN_NAME: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[ A-Za-z0-9_.'+\-%/À-ÖØ-öø-ÿ:&\[\]\(\)]+$"));
static TOKEN_SYMBOL: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\S+$"));
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| pattern(r"^0x[a-fA-F0-9]{40}$"));

const LIST_PROPERTIES: &[&str] = &["name", "timestamp", "version", "tokens", "tokenMap", "keywords", "tags", "logoURI"];
const TOKEN_PROPERTIES: &[&str] = &["chainId", "address", "decimals", "name", "symbol", "logoURI", "tags", "extensions"];
const MAX_TOKENS: usize = 10_000;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static pattern")
}

/// A violated token list rule, located by JSON pointer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "/" } else { &self.path };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Check a serialized token list against the token list schema, collecting every violation.
pub fn validate(document: &Value) -> Result<(), Vec<ValidationIssue>> {
    let mut validator = Validator::default();
    validator.list(document);

    if validator.issues.is_empty() { Ok(()) } else { Err(validator.issues) }
}

#[derive(Default)]
struct Validator {
    issues: Vec<ValidationIssue>,
}

impl Validator {
    fn issue(&mut self, path: &str, message: impl Into<String>) {
        self.issues.push(ValidationIssue { path: path.to_string(), message: message.into() });
    }

    fn list(&mut self, document: &Value) {
        let Some(list) = self.object(document, "") else {
            return;
        };
        self.unexpected_properties(list, LIST_PROPERTIES, "");

        if let Some(name) = self.required(list, "name", "") {
            self.string(name, "/name", 30, &LIST_NAME);
        }
        if let Some(timestamp) = self.required(list, "timestamp", "") {
            if let Some(timestamp) = self.string_value(timestamp, "/timestamp") {
                if chrono::DateTime::parse_from_rfc3339(timestamp).is_err() {
                    self.issue("/timestamp", "must be an RFC 3339 date-time");
                }
            }
        }
        if let Some(version) = self.required(list, "version", "") {
            self.version(version);
        }
        if let Some(logo) = list.get("logoURI") {
            self.uri(logo, "/logoURI");
        }
        if let Some(keywords) = list.get("keywords") {
            self.keywords(keywords);
        }

        let tag_ids = list.get("tags").map(|tags| self.tag_definitions(tags)).unwrap_or_default();

        if let Some(tokens) = self.required(list, "tokens", "") {
            if let Some(tokens) = self.array(tokens, "/tokens") {
                if tokens.is_empty() {
                    self.issue("/tokens", "must contain at least 1 token");
                }
                if tokens.len() > MAX_TOKENS {
                    self.issue("/tokens", format!("must contain at most {MAX_TOKENS} tokens"));
                }
                for (index, token) in tokens.iter().enumerate() {
                    self.token(token, &format!("/tokens/{index}"), &tag_ids);
                }
            }
        }
    }

    fn version(&mut self, version: &Value) {
        let Some(version) = self.object(version, "/version") else {
            return;
        };
        self.unexpected_properties(version, &["major", "minor", "patch"], "/version");
        for part in ["major", "minor", "patch"] {
            if let Some(value) = self.required(version, part, "/version") {
                self.integer(value, &format!("/version/{part}"), 0, u64::MAX);
            }
        }
    }

    fn keywords(&mut self, keywords: &Value) {
        let Some(keywords) = self.array(keywords, "/keywords") else {
            return;
        };
        if keywords.len() > 20 {
            self.issue("/keywords", "must contain at most 20 keywords");
        }
        let mut seen = HashSet::new();
        for (index, keyword) in keywords.iter().enumerate() {
            let path = format!("/keywords/{index}");
            if let Some(keyword) = self.string(keyword, &path, 20, &LIST_NAME) {
                if !seen.insert(keyword) {
                    self.issue(&path, format!("duplicate keyword `{keyword}`"));
                }
            }
        }
    }

    /// Returns the defined tag ids
    fn tag_definitions(&mut self, tags: &Value) -> HashSet<String> {
        let mut ids = HashSet::new();
        let Some(tags) = self.object(tags, "/tags") else {
            return ids;
        };
        if tags.len() > 20 {
            self.issue("/tags", "must define at most 20 tags");
        }

        for (id, definition) in tags {
            let path = format!("/tags/{id}");
            if id.is_empty() || id.chars().count() > 10 || !TAG_ID.is_match(id) {
                self.issue(&path, format!("invalid tag id `{id}`"));
            }
            ids.insert(id.clone());

            let Some(definition) = self.object(definition, &path) else {
                continue;
            };
            self.unexpected_properties(definition, &["name", "description"], &path);
            if let Some(name) = self.required(definition, "name", &path) {
                self.string(name, &format!("{path}/name"), 20, &TAG_NAME);
            }
            if let Some(description) = self.required(definition, "description", &path) {
                self.string(description, &format!("{path}/description"), 200, &TAG_DESCRIPTION);
            }
        }
        ids
    }

    fn token(&mut self, token: &Value, path: &str, tag_ids: &HashSet<String>) {
        let Some(token) = self.object(token, path) else {
            return;
        };
        self.unexpected_properties(token, TOKEN_PROPERTIES, path);

        if let Some(chain_id) = self.required(token, "chainId", path) {
            self.integer(chain_id, &format!("{path}/chainId"), 1, u64::MAX);
        }
        if let Some(address) = self.required(token, "address", path) {
            let address_path = format!("{path}/address");
            if let Some(address) = self.string_value(address, &address_path) {
                if !ADDRESS.is_match(address) {
                    self.issue(&address_path, format!("`{address}` is not a 0x-prefixed 20 byte hex address"));
                }
            }
        }
        if let Some(decimals) = self.required(token, "decimals", path) {
            self.integer(decimals, &format!("{path}/decimals"), 0, 255);
        }
        if let Some(name) = self.required(token, "name", path) {
            self.string(name, &format!("{path}/name"), 60, &TOKEN_NAME);
        }
        if let Some(symbol) = self.required(token, "symbol", path) {
            self.string(symbol, &format!("{path}/symbol"), 20, &TOKEN_SYMBOL);
        }
        if let Some(logo) = token.get("logoURI") {
            self.uri(logo, &format!("{path}/logoURI"));
        }
        if let Some(tags) = token.get("tags") {
            let tags_path = format!("{path}/tags");
            let Some(tags) = self.array(tags, &tags_path) else {
                return;
            };
            if tags.len() > 10 {
                self.issue(&tags_path, "must contain at most 10 tags");
            }
            let mut seen = HashSet::new();
            for (index, tag) in tags.iter().enumerate() {
                let tag_path = format!("{tags_path}/{index}");
                if let Some(tag) = self.string(tag, &tag_path, 10, &TAG_ID) {
                    if !seen.insert(tag) {
                        self.issue(&tag_path, format!("duplicate tag `{tag}`"));
                    } else if !tag_ids.contains(tag) {
                        self.issue(&tag_path, format!("tag `{tag}` is not defined in /tags"));
                    }
                }
            }
        }
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        let object = value.as_object();
        if object.is_none() {
            self.issue(path, "must be an object");
        }
        object
    }

    fn array<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Vec<Value>> {
        let array = value.as_array();
        if array.is_none() {
            self.issue(path, "must be an array");
        }
        array
    }

    fn required<'a>(&mut self, object: &'a Map<String, Value>, key: &str, path: &str) -> Option<&'a Value> {
        let value = object.get(key);
        if value.is_none() {
            self.issue(path, format!("missing required property `{key}`"));
        }
        value
    }

    fn unexpected_properties(&mut self, object: &Map<String, Value>, allowed: &[&str], path: &str) {
        for key in object.keys().filter(|key| !allowed.contains(&key.as_str())) {
            self.issue(&format!("{path}/{key}"), "unexpected property");
        }
    }

    fn string_value<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a str> {
        let string = value.as_str();
        if string.is_none() {
            self.issue(path, "must be a string");
        }
        string
    }

    /// Non-empty string of at most `max_len` characters matching `pattern`
    fn string<'a>(&mut self, value: &'a Value, path: &str, max_len: usize, pattern: &Regex) -> Option<&'a str> {
        let string = self.string_value(value, path)?;
        let len = string.chars().count();
        if len == 0 {
            self.issue(path, "must not be empty");
        } else if len > max_len {
            self.issue(path, format!("must be at most {max_len} characters, got {len}"));
        }
        if len > 0 && !pattern.is_match(string) {
            self.issue(path, format!("`{string}` does not match {}", pattern.as_str()));
        }
        Some(string)
    }

    fn integer(&mut self, value: &Value, path: &str, min: u64, max: u64) {
        match value.as_u64() {
            Some(number) if number < min => self.issue(path, format!("must be >= {min}")),
            Some(number) if number > max => self.issue(path, format!("must be <= {max}")),
            Some(_) => {}
            None => self.issue(path, "must be a non-negative integer"),
        }
    }

    fn uri(&mut self, value: &Value, path: &str) {
        if let Some(uri) = self.string_value(value, path) {
            if Url::parse(uri).is_err() {
                self.issue(path, format!("`{uri}` is not a valid URI"));
            }
        }
    }
}
