use colored::Colorize;

use shiftdesk_common::api::ShiftPage;
use shiftdesk_common::models::DAY_LABEL_FORMAT;
use shiftdesk_common::{Bucket, Shift};

/// Plain-text timeline output for `sd --list`
pub struct Render;

impl Render {
    fn build_prefix(&self, shift: &Shift) -> String {
        let id_str = shift.id.to_string();
        let padding = " ".repeat(5usize.saturating_sub(id_str.len()));
        format!("{}{}", padding, format!("{}.", shift.id).dimmed())
    }

    fn build_slots(&self, shift: &Shift) -> String {
        let slots = format!("{}/{}", shift.accepted, shift.slots);
        if shift.is_fully_booked() {
            format!("{} {}", slots.yellow(), "booked".yellow())
        } else {
            format!("{} {}", slots.green(), format!("{} open", shift.open_slots()).dimmed())
        }
    }

    fn build_pending(&self, shift: &Shift) -> String {
        match shift.pending_claims {
            0 => String::new(),
            1 => "1 claim pending".magenta().to_string(),
            n => format!("{n} claims pending").magenta().to_string(),
        }
    }

    pub fn shift_line(&self, shift: &Shift) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.build_prefix(shift),
            shift.time_range(),
            shift.role.bold(),
            format!("@ {}", shift.facility).dimmed(),
            self.build_slots(shift),
            self.build_pending(shift)
        )
        .trim_end()
        .to_string()
    }

    pub fn title_line(&self, bucket: &Bucket<Shift>) -> String {
        let today = chrono::Utc::now().format(DAY_LABEL_FORMAT).to_string();
        let title = if bucket.label == today {
            format!("{} {}", bucket.label.underline(), "[Today]".dimmed())
        } else {
            bucket.label.underline().to_string()
        };
        let open = bucket.records.iter().filter(|s| !s.is_fully_booked()).count();
        let correlation = format!("[{}/{} open]", open, bucket.records.len()).dimmed();
        format!(" {} {}", title, correlation)
    }

    pub fn display_page(&self, page: &ShiftPage) {
        if page.buckets.is_empty() {
            println!("\n  No shifts match the current filters");
            return;
        }
        for bucket in &page.buckets {
            println!("\n{}", self.title_line(bucket));
            for shift in &bucket.records {
                println!("{}", self.shift_line(shift));
            }
        }

        let shown = page.record_count();
        let mut summary = format!("Showing {} of {} shifts", shown, page.total_count);
        if page.has_next_page {
            summary.push_str(", more with --page-size");
        }
        println!("\n  {}\n", summary.dimmed());
    }

    pub fn fetch_failed(&self, message: &str) {
        eprintln!("\n {} Could not load shifts: {}\n", "✖".red(), message);
    }
}
