use crate::dialog::DetailBody;
use crate::model::Schedule;
use crate::ui::components::badge::create_status_badge;
use crate::utils::datetime::format_timestamp;

/// Read-only detail rows for one schedule.
///
/// Recurring schedules show their window and cron expression, one-shot
/// schedules show their run time.
pub fn schedule_detail_body(schedule: &Schedule, date_format: &str) -> DetailBody {
    let date = |value: &str| format_timestamp(value, date_format);

    let body = DetailBody::new()
        .row("ID", schedule.id.clone())
        .styled_row("Status", create_status_badge(&schedule.status))
        .row("Title", schedule.title.clone())
        .row("Description", schedule.description.clone())
        .row("Webhook URL", schedule.url.clone())
        .row("Email", schedule.email.clone())
        .row("Created at", date(&schedule.created_at));

    let body = if schedule.is_recurring {
        body.row("Start at", date(&schedule.start_at))
            .row("End at", date(&schedule.end_at))
            .row("Cron expression", schedule.cron_expr.clone())
            .row("Next run", date(&schedule.next_schedule_at))
    } else {
        body.row("Run at", date(&schedule.run_at))
    };

    body.row("Metadata", schedule.metadata_display())
}
