// ABOUTME: Drives a contact-form submission while reporting each state the form actually enters
// ABOUTME: Transitions come from the controller's watch channel, so rejected leads report nothing

use rockspace_brief::{FormState, LeadSubmitter, SubmissionController};
use rockspace_core::{QuoteRequest, Ticket};

/// Submit `lead`, calling `on_state` for every transition the form makes.
/// Returns once the submission settles and the last transition has been reported.
pub async fn submit_with_progress<S, F>(
    controller: SubmissionController<S>,
    lead: QuoteRequest,
    mut on_state: F,
) -> rockspace_brief::Result<Ticket>
where
    S: LeadSubmitter + 'static,
    F: FnMut(&FormState),
{
    let mut states = controller.subscribe();

    // The channel closes once the controller and its submission task are gone
    let submission = async move {
        let result = controller.submit(lead).await;
        drop(controller);
        result
    };
    let follow = async {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            on_state(&state);
        }
    };

    let (result, _) = tokio::join!(submission, follow);
    result
}
