use crate::{AppState, Effect, Msg, Notice, SwipeDirection};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FeedMounted | Msg::RetryClicked => {
            if state.begin_load() {
                vec![Effect::FetchJobs]
            } else {
                Vec::new()
            }
        }
        Msg::JobsLoaded(listings) => state.apply_loaded(listings),
        Msg::JobsFailed { .. } => {
            if state.apply_failed() {
                vec![Effect::Notify(Notice::LoadFailed)]
            } else {
                Vec::new()
            }
        }
        Msg::SentinelVisibility { fraction } => {
            state.sentinel_visibility(fraction).into_iter().collect()
        }
        Msg::PointerDown { job_id, pos } => {
            state.pointer_down(job_id, pos);
            Vec::new()
        }
        Msg::PointerMoved { job_id, pos } => {
            state.pointer_moved(&job_id, pos);
            Vec::new()
        }
        Msg::PointerUp { job_id } | Msg::PointerLeft { job_id } => {
            state.pointer_up(&job_id).into_iter().collect()
        }
        Msg::SkipClicked { job_id } => state
            .commit_card(job_id, SwipeDirection::Left)
            .into_iter()
            .collect(),
        Msg::ApplyClicked { job_id } => state
            .commit_card(job_id, SwipeDirection::Right)
            .into_iter()
            .collect(),
        Msg::SaveClicked { job_id } => state.toggle_saved(job_id).into_iter().collect(),
        Msg::DetailsOpened { job_id } => {
            state.open_details(job_id);
            Vec::new()
        }
        Msg::DetailsClosed => {
            state.close_details();
            Vec::new()
        }
        Msg::DetailsApplyClicked => match state.close_details() {
            // Same exit contract as the card's own Apply button.
            Some(job_id) => state
                .commit_card(job_id, SwipeDirection::Right)
                .into_iter()
                .collect(),
            None => Vec::new(),
        },
        Msg::DetailsSaveClicked => match state.selected().cloned() {
            Some(job_id) => state.toggle_saved(job_id).into_iter().collect(),
            None => Vec::new(),
        },
        Msg::TimerFired { timer } => state.timer_fired(timer),
        Msg::CardUnmounted { job_id } => state.unmount_card(&job_id),
        Msg::FeedUnmounted => state.unmount_feed(),
        Msg::LoggedIn(user) => {
            state.login(user.clone());
            vec![Effect::PersistSession(user)]
        }
        Msg::LoggedOut => {
            if state.logout() {
                vec![Effect::ClearSession]
            } else {
                Vec::new()
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
