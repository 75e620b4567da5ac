use std::future::Future;
use std::sync::Arc;

use crate::error::LlmError;

/// A text-completion service: text in, text out, may fail.
///
/// Uses RPITIT (return-position `impl Trait` in traits), no `async-trait` needed.
pub trait LanguageModel: Send + Sync {
    /// Complete `prompt`; `question` is sent alongside as the user's raw input.
    fn complete(
        &self,
        prompt: &str,
        question: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}

impl<M: LanguageModel> LanguageModel for Arc<M> {
    fn complete(
        &self,
        prompt: &str,
        question: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send {
        (**self).complete(prompt, question)
    }
}
