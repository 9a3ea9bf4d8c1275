use shared::models::{Quote, QuoteStatus};

/// Move a quote to `next`, returning the previous status
///
/// Any transition is applied; the nominal lifecycle is
/// `draft -> sent -> accepted | rejected | expired`.
pub fn transition_status(quote: &mut Quote, next: QuoteStatus) -> QuoteStatus {
    let previous = std::mem::replace(&mut quote.status, next);
    if previous != next && !previous.is_nominal_transition(next) {
        tracing::debug!(
            from = previous.as_str(),
            to = next.as_str(),
            terminal = previous.is_terminal(),
            "Quote status moved outside the nominal lifecycle"
        );
    }
    previous
}
