use indicatif::*;

/// Spinner for work of unknown length, such as waiting on an external
/// process that can only be polled.
pub struct ProgressReporter {
    pb: ProgressBar,
}

impl ProgressReporter {
    pub fn new(title: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let template = format!("{{spinner:.bold.green}} {}: ", title) + "({elapsed_precise}) ";
        pb.set_style(ProgressStyle::with_template(&template).unwrap());
        pb.tick();
        ProgressReporter { pb }
    }
    pub fn update(&mut self) {
        self.pb.tick();
    }
    pub fn done(&mut self) {
        self.pb.finish();
    }
}
