use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar counting games, labelled with what is being played.
pub fn games_progress(label: &str, games: u32) -> ProgressBar {
    let pb = ProgressBar::new(u64::from(games));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:>12} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb.set_message(label.to_owned());
    pb
}

/// Section header between training rounds.
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}
