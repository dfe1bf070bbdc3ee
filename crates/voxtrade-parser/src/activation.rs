use crate::error::VocabularyError;
use crate::normalize::NormalizedTranscript;

/// Ordered trigger phrases. The first phrase that occurs in a transcript wins,
/// even if a later phrase occurs earlier in the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivationSet {
    phrases: Vec<Vec<String>>,
}

/// A located activation phrase and the command body that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation<'a> {
    pub phrase: String,
    pub body: &'a [String],
}

impl ActivationSet {
    /// Phrases are normalized like transcripts, so punctuation and case do not matter.
    pub fn new<I, S>(phrases: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = Vec::new();
        for (index, phrase) in phrases.into_iter().enumerate() {
            let tokens = NormalizedTranscript::new(phrase.as_ref()).tokens().to_vec();
            if tokens.is_empty() {
                return Err(VocabularyError::EmptyActivationPhrase(index));
            }
            if !normalized.contains(&tokens) {
                normalized.push(tokens);
            }
        }

        if normalized.is_empty() {
            return Err(VocabularyError::NoActivationPhrases);
        }

        Ok(Self { phrases: normalized })
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Whole-phrase search over the normalized tokens.
    pub fn locate<'a>(&self, transcript: &'a NormalizedTranscript) -> Option<Activation<'a>> {
        let tokens = transcript.tokens();
        self.phrases.iter().find_map(|phrase| {
            tokens
                .windows(phrase.len())
                .position(|window| window == phrase.as_slice())
                .map(|start| Activation {
                    phrase: phrase.join(" "),
                    body: &tokens[start + phrase.len()..],
                })
        })
    }
}
