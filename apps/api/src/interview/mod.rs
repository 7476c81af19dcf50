// Interview engine: history model, session turns, prompt composition, feedback.
// All LLM calls go through dialogue — no direct Gemini calls here.
//
// capture and handoff model the browser-held half of the contract (when an
// answer may be submitted, how a finished history reaches the feedback step);
// the server binary never calls them.

#[allow(dead_code)]
pub mod capture;
pub mod feedback;
pub mod handlers;
#[allow(dead_code)]
pub mod handoff;
pub mod history;
pub mod prompts;
pub mod session;
