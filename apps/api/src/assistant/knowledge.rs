//! Knowledge-base Q&A — answers grounded in a fixed table of finance passages.

use serde::Serialize;
use tracing::debug;

use crate::assistant::prompts::{KNOWLEDGE_PROMPT_TEMPLATE, KNOWLEDGE_SYSTEM};
use crate::llm_client::prompts::{fill, ASSISTANT_PERSONA};
use crate::llm_client::{LanguageModel, LlmError, Turn};

/// Ordered (keyword, passage) table. Keywords are lowercase; the first keyword
/// contained in the query wins, so more specific keywords come first.
pub const KNOWLEDGE_BASE: &[(&str, &str)] = &[
    (
        "jeonse ratio",
        "The jeonse ratio is the jeonse deposit divided by the purchase price, expressed as a \
         percentage. A ratio between 60% and 75% is generally considered a healthy band. Above \
         80% the gap between deposit and price is thin, so a small price fall can leave the \
         owner unable to return the deposit (reverse-jeonse risk).",
    ),
    (
        "jeonse",
        "Jeonse is a Korean lease in which the tenant pays a large lump-sum deposit instead of \
         monthly rent and receives the full deposit back at the end of the term. Owners often \
         use the deposit to fund the purchase, which reduces the cash they must invest.",
    ),
    (
        "ltv",
        "LTV (loan-to-value) is the loan amount divided by the property price, as a percentage. \
         An LTV above 70% is a high leverage level that magnifies losses when prices fall or \
         rates rise. An LTV at or below 50% is usually regarded as a stable financing structure.",
    ),
    (
        "loan-to-value",
        "Loan-to-value compares the size of a mortgage with the value of the property it is \
         secured on. Lenders cap it by regulation, and lower values leave more equity cushion.",
    ),
    (
        "dsr",
        "DSR (debt service ratio) is the total annual principal and interest payments on all of \
         a borrower's loans divided by annual income. Korean lenders apply DSR caps, commonly \
         around 40%, when approving new mortgages.",
    ),
    (
        "net yield",
        "Net yield is annual rent minus annual loan interest, divided by the cash actually \
         invested (price minus deposit minus loan), as a percentage. When the invested cash is \
         zero or negative the yield is not meaningful and is reported as N/A.",
    ),
    (
        "net worth",
        "Net worth is total assets minus total liabilities. Tracking it monthly shows whether \
         saving, investing and debt repayment are moving your finances in the right direction.",
    ),
    (
        "budget",
        "A common budgeting rule splits take-home income into about 50% for essentials, 30% for \
         discretionary spending and 20% for savings and debt repayment. Reviewing actual spending \
         against these targets each month highlights where to adjust.",
    ),
    (
        "aura ai",
        "Aura AI is the assistant built into this personal-finance dashboard. It can chat about \
         your finances, answer questions from its knowledge base, summarize documents, and run \
         real-estate investment calculations and property analyses.",
    ),
    (
        "llm",
        "A large language model (LLM) is a neural network trained on large amounts of text that \
         generates language by predicting likely continuations. It can draft, summarize and \
         answer questions, but it can also state incorrect facts confidently, so important \
         figures should be verified.",
    ),
];

/// Used when no keyword matches.
pub const DEFAULT_PASSAGE: &str = "The knowledge base covers personal-finance basics such as \
net worth, budgeting and DSR, Korean real-estate terms such as jeonse, jeonse ratio, LTV and net \
yield, and general information about Aura AI and large language models.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Passage {
    /// Matched keyword, or `None` for the default passage.
    pub topic: Option<&'static str>,
    pub text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeAnswer {
    pub answer: String,
    pub source_topic: Option<String>,
}

/// Case-insensitive substring search over `KNOWLEDGE_BASE`.
pub fn search_knowledge_base(query: &str) -> Passage {
    let needle = query.to_lowercase();
    KNOWLEDGE_BASE
        .iter()
        .find(|(keyword, _)| needle.contains(keyword))
        .map(|&(keyword, text)| Passage {
            topic: Some(keyword),
            text,
        })
        .unwrap_or(Passage {
            topic: None,
            text: DEFAULT_PASSAGE,
        })
}

/// Retrieves the passage for `query` and has the model answer from it alone.
pub async fn answer_question(
    llm: &dyn LanguageModel,
    query: &str,
) -> Result<KnowledgeAnswer, LlmError> {
    let passage = search_knowledge_base(query);
    debug!("Knowledge passage selected: {:?}", passage.topic);

    let system = fill(KNOWLEDGE_SYSTEM, &[("persona", ASSISTANT_PERSONA)]);
    let prompt = fill(
        KNOWLEDGE_PROMPT_TEMPLATE,
        &[("passage", passage.text), ("query", query)],
    );
    let answer = llm.complete(&system, &[Turn::user(&prompt)]).await?;

    Ok(KnowledgeAnswer {
        answer,
        source_topic: passage.topic.map(str::to_string),
    })
}
