//! Prompt templates for the split flow

use crate::record::entities::Aspects;

/// Templates for generating prompts at each stage
pub struct SplitPromptTemplate;

impl SplitPromptTemplate {
    /// User prompt asking for one candidate split
    pub fn generation(sentence: &str, aspects: &Aspects) -> String {
        format!(
            r#"
You are a sentence splitting expert. You will be provided with a review sentence and a few [aspect, category, sentiment, opinion] quadruplets from that review sentence. Here is the definition of each element in the quadruplet:
- The ‘aspect’ refers to a specific feature, attribute, or aspect of a product or service that a user may express an opinion about. The aspect term might be ‘null’ for an implicit aspect.
- The ‘opinion’ refers to the sentiment or attitude expressed by a user towards a particular aspect or feature of a product or service. The opinion term might be ‘null’ for an implicit opinion.
- The ‘category’ refers to the category that the aspect belongs to (e.g. food quality, restaurant general, etc.).
- The ‘sentiment’ refers to the sentiment class of the aspect (e.g. positive, negative, neutral).

You need to split the sentence into shorter sentences such that each short sentence contains one aspect term. When splitting, sentences connected by conjunctions must be divided into individual sentences along with their conjunctions. This process must specify the subject in every sentence. This process must retain the existing spellings exactly as in the original sentence. This process must also retain the existing spacings exactly as in the original sentence. If the sentence is too short to split or does not need to be split, use the original sentence as is. No numbering, line breaks, or explanations are needed.

ORIGINAL SENTENCE:
{sentence}

ASPECT TERMS:
{aspects}
"#,
            sentence = sentence,
            aspects = aspects.render(),
        )
    }

    /// User prompt asking the model to keep the best `k` candidates
    pub fn filter(sentence: &str, aspects: &Aspects, candidates: &[String], k: usize) -> String {
        format!(
            r#"
You are a strict evaluator of Aspect-Term-Oriented Sentence Splitting (ATOSS).

Your task:
Given:
- the ORIGINAL sentence,
- ASPECT terms,
- {count} CANDIDATE split versions S′ (each S′ is a SINGLE STRING containing several shorter sentences),

Select EXACTLY {k} BEST versions that follow ALL splitting rules.

A valid split version S′ MUST satisfy:

RULES:
1. S′ must be ONE SINGLE STRING that includes several shorter sentences.
2. Each shorter sentence MUST contain EXACTLY ONE aspect term.
3. All spellings must match the original EXACTLY (no substitutions).
4. All spacing must match the original EXACTLY (no extra/missing spaces).
5. No rewriting, no paraphrasing, no synonym replacements.
6. No missing content and no added content.
7. No reordering of any part of the original sentence.
8. Every shorter sentence MUST contain an explicit subject.
9. Conjunctions ("and", "or", "but", commas) may appear ONLY if they appear in the original.

INVALID candidates should be discarded:
- If any sentence has zero aspects or more than one → invalid.
- If spelling/spacing changes → invalid.
- If subject is missing → invalid.
- If content is removed, merged, or reordered → invalid.

------------------------------------------
### EXAMPLES OF CORRECT S′ FORMAT (from ATOSS paper)

Correct S′ example:
very immature bartender, didnt know how to make specific drinks. service was so slowwwww. the food was not fresh or warm. waitresses were busy flirting with men at the bar and werent very attentive to all the customers .

Another valid S′:
i swore never to return for a warm beer. i swore never to return for a mediocre meal.

------------------------------------------

OUTPUT REQUIREMENT:
- Return EXACTLY {k} valid S′ versions.
- Each version on its own line.
- NO JSON, NO numbering, NO markdown, NO explanation.

ORIGINAL SENTENCE:
{sentence}

ASPECT TERMS:
{aspects}

CANDIDATES SPLITS:
{candidates}
"#,
            count = candidates.len(),
            k = k,
            sentence = sentence,
            aspects = aspects.render(),
            candidates = Self::render_candidates(candidates),
        )
    }

    /// Pretty-printed JSON array, two-space indent
    fn render_candidates(candidates: &[String]) -> String {
        serde_json::to_string_pretty(candidates).unwrap_or_else(|_| format!("{candidates:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::entities::Quadruplet;

    fn aspects() -> Aspects {
        Aspects::new(vec![
            Quadruplet::new("food", "food quality", "positive", "great"),
            Quadruplet::new("service", "service general", "negative", "slow"),
        ])
    }

    #[test]
    fn test_generation_contains_sentence_and_aspects() {
        let sentence = "The food was great but the service was slow.";
        let prompt = SplitPromptTemplate::generation(sentence, &aspects());
        assert!(!prompt.is_empty());
        assert!(prompt.contains(sentence));
        assert!(prompt.contains("[food, food quality, positive, great]"));
        assert!(prompt.contains("[service, service general, negative, slow]"));
    }

    #[test]
    fn test_generation_with_odd_sentences() {
        for sentence in ["x", "  spaced   out  ", "quotes \"and\" {braces}", "phở ngon"] {
            let prompt = SplitPromptTemplate::generation(sentence, &Aspects::default());
            assert!(prompt.contains(sentence));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = SplitPromptTemplate::generation("s", &aspects());
        let b = SplitPromptTemplate::generation("s", &aspects());
        assert_eq!(a, b);
    }

    #[test]
    fn test_filter_contains_all_candidates() {
        let candidates: Vec<String> = (0..10)
            .map(|i| format!("The food was great {i}. The service was slow."))
            .collect();
        let prompt = SplitPromptTemplate::filter("s", &aspects(), &candidates, 2);
        let rendered = serde_json::to_string_pretty(&candidates).unwrap();
        assert!(prompt.contains(&rendered));
        for candidate in &candidates {
            assert!(prompt.contains(candidate.as_str()));
        }
        assert!(prompt.contains("Select EXACTLY 2 BEST"));
        assert!(prompt.contains("- 10 CANDIDATE split versions"));
    }

    #[test]
    fn test_prompts_keep_exact_wording() {
        let generation = SplitPromptTemplate::generation("s", &aspects());
        assert!(generation.starts_with("\nYou are a sentence splitting expert."));
        assert!(generation.contains("- The \u{2018}aspect\u{2019} refers to"));
        assert!(generation.contains("might be \u{2018}null\u{2019} for an implicit opinion."));

        let filter = SplitPromptTemplate::filter("s", &aspects(), &["c".to_string()], 1);
        assert!(filter.starts_with("\nYou are a strict evaluator"));
        assert!(filter.contains("each S\u{2032} is a SINGLE STRING"));
        assert!(filter.contains("If subject is missing \u{2192} invalid."));
        assert!(filter.contains("### EXAMPLES OF CORRECT S\u{2032} FORMAT (from ATOSS paper)\n"));
    }

    #[test]
    fn test_filter_escapes_quotes_in_candidates() {
        let candidates = vec!["He said \"great\".".to_string()];
        let prompt = SplitPromptTemplate::filter("s", &aspects(), &candidates, 1);
        assert!(prompt.contains(r#""He said \"great\".""#));
    }
}
