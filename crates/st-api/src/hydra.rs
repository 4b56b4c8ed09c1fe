//! Hypermedia document shaping.
//!
//! Every response body is a JSON-LD-flavored document: an `@context`
//! naming the vocabulary, a `start` link back to the index, and
//! `@id`/`@type` on each resource. A time status additionally advertises
//! the PUT operation that replaces it.

use serde_json::{Value, json};

use st_core::{Account, TimeStatus};

/// Builds absolute link targets from the configured public base URL.
#[derive(Debug, Clone)]
pub struct Links {
    base: String,
}

impl Links {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    #[must_use]
    pub fn index(&self) -> String {
        format!("{}/", self.base)
    }

    #[must_use]
    pub fn vocab(&self) -> String {
        format!("{}/vocab", self.base)
    }

    #[must_use]
    pub fn user(&self, username: &str) -> String {
        format!("{}/user/{username}", self.base)
    }

    #[must_use]
    pub fn timestatus(&self, username: &str) -> String {
        format!("{}/user/{username}/timestatus", self.base)
    }
}

/// Wraps a document with the shared `@context` and `start` link.
#[must_use]
pub fn envelope(links: &Links, document: Value) -> Value {
    let Value::Object(mut map) = document else {
        // Documents are always objects; anything else passes through.
        return document;
    };
    map.insert("@context".to_string(), context(links));
    map.insert("start".to_string(), Value::String(links.index()));
    Value::Object(map)
}

fn context(links: &Links) -> Value {
    json!({
        "vocab": format!("{}#", links.vocab()),
        "hydra": "http://www.w3.org/ns/hydra/core#",
        "operation": "hydra:operation",
        "method": "hydra:method",
        "expects": "hydra:expects",
        "rdfs": "http://www.w3.org/2000/01/rdf-schema#",
        "User": "vocab:User",
        "Index": "vocab:Index",
        "TimeStatus": "vocab:TimeStatus",
        "user": "vocab:user",
        "time": "vocab:time",
        "locked": "vocab:locked",
        "timestatus": "vocab:timestatus",
        "start": "xhtml:start",
        "xhtml": "http://www.w3.org/1999/xhtml/vocab#",
    })
}

/// The index document: one link per normal account.
#[must_use]
pub fn index_doc(links: &Links, accounts: &[Account]) -> Value {
    json!({
        "@id": links.index(),
        "@type": "Index",
        "user": accounts
            .iter()
            .map(|account| user_link(links, account))
            .collect::<Vec<_>>(),
    })
}

fn user_link(links: &Links, account: &Account) -> Value {
    json!({
        "@id": links.user(&account.username),
        "@type": "User",
        "username": account.username,
    })
}

/// A single account with its embedded time status.
#[must_use]
pub fn user_doc(links: &Links, account: &Account, status: TimeStatus) -> Value {
    let mut doc = user_link(links, account);
    if let Value::Object(map) = &mut doc {
        map.insert(
            "timestatus".to_string(),
            timestatus_doc(links, &account.username, status),
        );
    }
    doc
}

/// The time status document, advertising the replace operation.
#[must_use]
pub fn timestatus_doc(links: &Links, username: &str, status: TimeStatus) -> Value {
    json!({
        "@id": links.timestatus(username),
        "@type": "TimeStatus",
        "user": links.user(username),
        "time": status.time,
        "locked": status.locked,
        "operation": [{
            "@type": "hydra:CreateResourceOperation",
            "method": "PUT",
            "expects": "TimeStatus",
        }],
    })
}

/// The vocabulary document describing the exposed classes.
#[must_use]
pub fn vocab_doc() -> Value {
    json!({
        "hydra:supportedClass": [
            {
                "@id": "Index",
                "hydra:supportedProperty": [
                    { "@id": "user", "@type": "hydra:Link" },
                ],
            },
            {
                "@id": "User",
                "hydra:supportedProperty": [
                    { "@id": "timestatus", "@type": "hydra:Link", "rdfs:range": "TimeStatus" },
                    { "@id": "username" },
                ],
            },
            {
                "@id": "TimeStatus",
                "hydra:supportedProperty": [
                    {
                        "@id": "time",
                        "rdfs:domain": "TimeStatus",
                        "rdfs:comment": "used time in seconds",
                    },
                    {
                        "@id": "locked",
                        "rdfs:domain": "TimeStatus",
                        "rdfs:comment": "is the user currently locked out",
                    },
                    { "@id": "user", "@type": "hydra:Link" },
                ],
            },
        ],
    })
}
