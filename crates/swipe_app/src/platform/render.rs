use swipe_core::{
    AppViewModel, CardView, DetailsView, FeedStatus, MatchTier, Notice, SwipeDirection,
};

pub fn render(view: &AppViewModel) -> String {
    let mut lines = Vec::new();
    lines.push(match &view.user_name {
        Some(name) => format!("== Job feed ({name}) =="),
        None => "== Job feed ==".to_string(),
    });

    match view.status {
        FeedStatus::Loading => lines.push("Loading jobs...".to_string()),
        FeedStatus::Empty => lines.push("No jobs found. Type `retry` to try again.".to_string()),
        FeedStatus::Failed => {
            lines.push("Could not load jobs from server. Type `retry` to try again.".to_string())
        }
        FeedStatus::Browsing | FeedStatus::CaughtUp => {
            for (position, card) in view.cards.iter().enumerate() {
                render_card(&mut lines, position + 1, card);
            }
        }
    }

    if view.show_skeletons {
        lines.push("  (loading more...)".to_string());
    } else if view.show_sentinel {
        lines.push("  -- scroll to load more --".to_string());
    }
    if view.status == FeedStatus::CaughtUp {
        lines.push("You're all caught up!".to_string());
    }
    if let Some(details) = &view.details {
        render_details(&mut lines, details);
    }
    lines.join("\n")
}

pub fn toast(notice: &Notice) -> String {
    match notice {
        Notice::Applied { title } => {
            format!("Applied to {title}! Your application is being processed")
        }
        Notice::Skipped => "Job skipped".to_string(),
        Notice::Saved { title } => format!("Saved {title}. You can find it in your saved jobs"),
        Notice::LoadFailed => "Could not load jobs from server".to_string(),
    }
}

fn render_card(lines: &mut Vec<String>, position: usize, card: &CardView) {
    let saved = if card.saved { " [saved]" } else { "" };
    lines.push(format!(
        "[{position}] #{} {} @ {} ({}) {}% match {}{saved}",
        card.job_id,
        card.title,
        card.company,
        card.initials,
        card.match_score,
        tier_label(card.match_tier),
    ));

    let facts: Vec<&str> = [
        card.location.as_str(),
        card.salary_range.as_str(),
        card.job_type.as_str(),
        card.posted.as_str(),
    ]
    .into_iter()
    .filter(|fact| !fact.is_empty())
    .collect();
    lines.push(format!("    {}", facts.join(" | ")));

    if !card.skills.is_empty() {
        let more = if card.more_skills > 0 {
            format!(" +{} more", card.more_skills)
        } else {
            String::new()
        };
        lines.push(format!("    {}{more}", card.skills.join(", ")));
    }

    if let Some(direction) = card.exiting {
        let (x, rotation) = card.exit_pose.unwrap_or_default();
        lines.push(format!(
            "    >> {} (x={x:.0}, rot={rotation:.0})",
            direction_label(direction)
        ));
    } else if card.dragging {
        let mut drag = format!(
            "    ~ drag dx={:.0} dy={:.0} rot={:.1}",
            card.offset.x, card.offset.y, card.rotation_deg
        );
        if let Some(direction) = card.overlay {
            drag.push_str(&format!(
                " {} {:.2}",
                direction_label(direction),
                card.overlay_opacity
            ));
        }
        lines.push(drag);
    }
}

fn render_details(lines: &mut Vec<String>, details: &DetailsView) {
    lines.push(String::new());
    lines.push(format!("-- {} @ {} --", details.title, details.company));
    lines.push(format!(
        "   {} | {} | {} | {} | {}% match",
        details.location,
        details.salary_range,
        details.job_type,
        details.posted,
        details.match_score
    ));

    let full = &details.full_description;
    for (label, value) in [
        ("Category", &full.category),
        ("Work mode", &full.work_mode),
        ("Stipend", &full.stipend),
        ("Duration", &full.duration),
    ] {
        if !value.is_empty() {
            lines.push(format!("   {label}: {value}"));
        }
    }
    push_list(lines, "About the role", &full.description);
    push_list(lines, "Requirements", &full.requirements);
    push_list(lines, "Qualifications", &details.qualifications);
    push_list(lines, "Benefits", &details.benefits);
    if let Some(url) = &details.apply_url {
        lines.push(format!("   Apply at: {url}"));
    }
    lines.push(format!(
        "   [details-apply] [details-save{}] [close]",
        if details.saved { ": saved" } else { "" }
    ));
}

fn push_list(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("   {heading}:"));
    lines.extend(items.iter().map(|item| format!("    - {item}")));
}

fn tier_label(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::High => "[high]",
        MatchTier::Medium => "[medium]",
        MatchTier::Low => "[low]",
    }
}

fn direction_label(direction: SwipeDirection) -> &'static str {
    match direction {
        SwipeDirection::Right => "APPLY",
        SwipeDirection::Left => "SKIP",
    }
}

#[cfg(test)]
mod tests {
    use swipe_core::{update, AppState, JobId, JobListing, Msg, PagerConfig, Point};

    use super::*;

    fn loaded(listings: Vec<JobListing>) -> AppState {
        let state = AppState::with_config(PagerConfig::default());
        let (state, _) = update(state, Msg::FeedMounted);
        let (state, _) = update(state, Msg::JobsLoaded(listings));
        state
    }

    #[test]
    fn failed_load_offers_retry() {
        let (state, _) = update(AppState::new(), Msg::FeedMounted);
        let (state, _) = update(
            state,
            Msg::JobsFailed {
                message: "timeout".to_string(),
            },
        );
        assert!(render(&state.view()).contains("Type `retry`"));
    }

    #[test]
    fn cards_show_skill_overflow_and_caught_up() {
        let mut listing = JobListing::new("1", "DevOps Engineer", "CloudScale");
        listing.skills = ["Kubernetes", "Docker", "CI/CD", "AWS", "Terraform"]
            .map(String::from)
            .to_vec();
        let text = render(&loaded(vec![listing]).view());
        assert!(text.contains("DevOps Engineer @ CloudScale (C)"));
        assert!(text.contains("Kubernetes, Docker, CI/CD, AWS +1 more"));
        assert!(text.contains("You're all caught up!"));
    }

    #[test]
    fn dragging_card_shows_overlay() {
        let state = loaded(vec![JobListing::new("1", "Product Designer", "DesignHub")]);
        let job_id = JobId::new("1");
        let (state, _) = update(
            state,
            Msg::PointerDown {
                job_id: job_id.clone(),
                pos: Point::ZERO,
            },
        );
        let (state, _) = update(
            state,
            Msg::PointerMoved {
                job_id,
                pos: Point::new(-80.0, 0.0),
            },
        );
        assert!(render(&state.view()).contains("SKIP 0.80"));
    }

    #[test]
    fn toasts_name_the_job() {
        assert_eq!(
            toast(&Notice::Applied {
                title: "Data Scientist".to_string()
            }),
            "Applied to Data Scientist! Your application is being processed"
        );
        assert_eq!(toast(&Notice::Skipped), "Job skipped");
    }
}
