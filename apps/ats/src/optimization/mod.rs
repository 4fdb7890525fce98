// Resume optimization: gap-aware, schema-constrained rewrite of the candidate's resume.
// Gap analysis itself comes from the scoring pipeline; see engine::AtsEngine::optimize.

pub mod prompts;
pub mod rewriter;
