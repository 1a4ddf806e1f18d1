//! Record domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Placeholder used by the annotation scheme for implicit aspects/opinions.
pub const IMPLICIT_TERM: &str = "null";

/// One `[aspect, category, sentiment, opinion]` annotation (Value Object)
///
/// Datasets store quadruplets either as 4-element arrays or as objects with
/// named keys; both shapes deserialize into this type. JSON `null` becomes
/// the literal [`IMPLICIT_TERM`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuadruplet")]
pub struct Quadruplet {
    pub aspect: String,
    pub category: String,
    pub sentiment: String,
    pub opinion: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuadruplet {
    List(Vec<Option<String>>),
    Map {
        aspect: Option<String>,
        category: Option<String>,
        sentiment: Option<String>,
        opinion: Option<String>,
    },
}

impl TryFrom<RawQuadruplet> for Quadruplet {
    type Error = DomainError;

    fn try_from(raw: RawQuadruplet) -> Result<Self, Self::Error> {
        let term = |v: Option<String>| v.unwrap_or_else(|| IMPLICIT_TERM.to_string());
        match raw {
            RawQuadruplet::List(fields) => {
                let [aspect, category, sentiment, opinion]: [Option<String>; 4] =
                    fields.try_into().map_err(|fields: Vec<Option<String>>| {
                        DomainError::InvalidQuadruplet(format!(
                            "expected 4 fields, got {}",
                            fields.len()
                        ))
                    })?;
                Ok(Self::new(
                    term(aspect),
                    term(category),
                    term(sentiment),
                    term(opinion),
                ))
            }
            RawQuadruplet::Map {
                aspect,
                category,
                sentiment,
                opinion,
            } => Ok(Self::new(
                term(aspect),
                term(category),
                term(sentiment),
                term(opinion),
            )),
        }
    }
}

impl Quadruplet {
    pub fn new(
        aspect: impl Into<String>,
        category: impl Into<String>,
        sentiment: impl Into<String>,
        opinion: impl Into<String>,
    ) -> Self {
        Self {
            aspect: aspect.into(),
            category: category.into(),
            sentiment: sentiment.into(),
            opinion: opinion.into(),
        }
    }
}

impl fmt::Display for Quadruplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.aspect, self.category, self.sentiment, self.opinion
        )
    }
}

/// Ordered aspect annotations of a sentence
///
/// Accepts a JSON list of quadruplets, or a string holding such a list
/// (datasets exported through CSV keep the labels column encoded).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Aspects(Vec<Quadruplet>);

impl<'de> Deserialize<'de> for Aspects {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawAspects {
            List(Vec<Quadruplet>),
            Encoded(String),
        }

        match RawAspects::deserialize(deserializer)? {
            RawAspects::List(items) => Ok(Aspects(items)),
            RawAspects::Encoded(s) => serde_json::from_str::<Vec<Quadruplet>>(&s)
                .map(Aspects)
                .map_err(serde::de::Error::custom),
        }
    }
}

impl Aspects {
    pub fn new(items: Vec<Quadruplet>) -> Self {
        Self(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the annotations for a prompt, one quadruplet per line
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|q| q.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Quadruplet>> for Aspects {
    fn from(items: Vec<Quadruplet>) -> Self {
        Self(items)
    }
}

/// One row of the input dataset (Entity)
///
/// Immutable once constructed; the sentence is guaranteed non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    sentence: String,
    aspects: Aspects,
}

impl Record {
    pub fn new(sentence: impl Into<String>, aspects: Aspects) -> Result<Self, DomainError> {
        let sentence = sentence.into();
        if sentence.trim().is_empty() {
            return Err(DomainError::EmptySentence);
        }
        Ok(Self { sentence, aspects })
    }

    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    pub fn aspects(&self) -> &Aspects {
        &self.aspects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadruplet_from_array() {
        let q: Quadruplet =
            serde_json::from_str(r#"["food", "food quality", "positive", "great"]"#).unwrap();
        assert_eq!(q, Quadruplet::new("food", "food quality", "positive", "great"));
    }

    #[test]
    fn test_quadruplet_from_object_with_nulls() {
        let q: Quadruplet = serde_json::from_str(
            r#"{"aspect": null, "category": "restaurant general", "sentiment": "negative", "opinion": "never again"}"#,
        )
        .unwrap();
        assert_eq!(q.aspect, IMPLICIT_TERM);
        assert_eq!(q.opinion, "never again");
        assert_eq!(q.category, "restaurant general");
    }

    #[test]
    fn test_quadruplet_wrong_arity() {
        let err = serde_json::from_str::<Quadruplet>(r#"["food", "positive"]"#).unwrap_err();
        assert!(err.to_string().contains("expected 4 fields, got 2"));
    }

    #[test]
    fn test_aspects_from_encoded_string() {
        let aspects: Aspects = serde_json::from_str(
            r#""[[\"food\", \"food quality\", \"positive\", \"great\"]]""#,
        )
        .unwrap();
        assert_eq!(aspects.len(), 1);
        assert_eq!(aspects.render(), "[food, food quality, positive, great]");
    }

    #[test]
    fn test_aspects_render() {
        let aspects = Aspects::new(vec![
            Quadruplet::new("food", "food quality", "positive", "great"),
            Quadruplet::new("service", "service general", "negative", "slow"),
        ]);
        assert_eq!(
            aspects.render(),
            "[food, food quality, positive, great]\n[service, service general, negative, slow]"
        );
    }

    #[test]
    fn test_record_rejects_blank_sentence() {
        assert_eq!(
            Record::new("   ", Aspects::default()),
            Err(DomainError::EmptySentence)
        );
        assert!(Record::new("The food was great.", Aspects::default()).is_ok());
    }
}
