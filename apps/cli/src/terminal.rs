//! Terminal rendition of the display regions.

use std::io::Write;

use client_core::{DisplaySurface, Region, ResultsView};
use shared::domain::BannerSeverity;

const BAR_WIDTH: usize = 40;

pub struct TerminalSurface<O, E> {
    out: O,
    err: E,
    subject: String,
    error_message: String,
    results: Option<ResultsView>,
}

impl<O: Write, E: Write> TerminalSurface<O, E> {
    pub fn new(out: O, err: E, subject: impl Into<String>) -> Self {
        Self {
            out,
            err,
            subject: subject.into(),
            error_message: String::new(),
            results: None,
        }
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    fn print_results(&mut self) -> std::io::Result<()> {
        let Some(view) = &self.results else {
            return Ok(());
        };
        writeln!(
            self.out,
            "[{}] {}",
            severity_tag(view.banner.severity),
            view.banner.title
        )?;
        writeln!(self.out, "{}", view.banner.description)?;
        for bar in &view.scores {
            writeln!(
                self.out,
                "{:<7} {} {}",
                bar.kind.label(),
                draw_bar(bar.width_percent),
                bar.text
            )?;
        }
        let preview = match view.preview_bytes() {
            Ok(bytes) => format!("{} bytes", bytes.len()),
            Err(_) => "unavailable".to_string(),
        };
        writeln!(self.out, "preview: {preview}")
    }
}

impl<O: Write, E: Write> DisplaySurface for TerminalSurface<O, E> {
    fn set_visible(&mut self, region: Region, visible: bool) {
        if !visible {
            return;
        }
        let written = match region {
            Region::Loading => writeln!(self.err, "Analyzing {}...", self.subject),
            Region::Error => writeln!(self.err, "error: {}", self.error_message),
            Region::Results => self.print_results(),
        };
        if let Err(err) = written {
            tracing::warn!("failed to write to terminal: {err}");
        }
    }

    fn set_error_message(&mut self, message: &str) {
        self.error_message = message.to_string();
    }

    fn set_results(&mut self, view: &ResultsView) {
        self.results = Some(view.clone());
    }
}

fn severity_tag(severity: BannerSeverity) -> &'static str {
    match severity {
        BannerSeverity::Success => "OK",
        BannerSeverity::Info => "INFO",
        BannerSeverity::Warning => "WARN",
        BannerSeverity::Danger => "DANGER",
        BannerSeverity::Secondary => "--",
    }
}

fn draw_bar(width_percent: f32) -> String {
    let filled = ((width_percent / 100.0) * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}
