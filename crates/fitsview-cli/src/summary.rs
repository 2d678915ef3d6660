use console::Style;
use fitsview_core::search::{Chip, ResultCard, SearchController, SearchPhase};
use fitsview_core::viewer::{shape_label, SliceControl};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    chip: Style,
    muted: Style,
    error: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            chip: Style::new().green(),
            muted: Style::new().dim().yellow(),
            error: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }
}

pub struct FileSummary<'a> {
    pub file_id: &'a str,
    pub filename: Option<&'a str>,
    pub shape: &'a [usize],
    pub header_summary: &'a str,
    pub slice: SliceControl,
}

pub fn print_file_summary(file: &FileSummary<'_>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("FITS file"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(9)));
    println!("  {:<10}{}", s.label.apply_to("File id"), s.value.apply_to(file.file_id));
    println!(
        "  {:<10}{}",
        s.label.apply_to("Name"),
        s.path.apply_to(file.filename.unwrap_or("-"))
    );
    println!(
        "  {:<10}{}",
        s.label.apply_to("Shape"),
        s.value.apply_to(shape_label(file.shape))
    );
    if file.slice.enabled {
        println!(
            "  {:<10}{}",
            s.label.apply_to("Slices"),
            s.value.apply_to(format!("0..={}", file.slice.max))
        );
    } else {
        println!("  {:<10}{}", s.label.apply_to("Slices"), s.muted.apply_to("n/a (2-D)"));
    }
    println!("  {:<10}{}", s.label.apply_to("Header"), file.header_summary);
    println!();
}

pub fn print_search_results(controller: &SearchController, chips: &[Chip], cards: &[ResultCard]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.path.apply_to(controller.location()));
    if !chips.is_empty() {
        let labels: Vec<String> = chips
            .iter()
            .map(|c| format!("[{}]", s.chip.apply_to(&c.label)))
            .collect();
        println!("  {}", labels.join(" "));
    }
    println!();

    if let SearchPhase::Failed(reason) = controller.phase() {
        println!("  {}", s.error.apply_to(controller.summary()));
        println!("  {}", s.muted.apply_to(reason));
        return;
    }

    if !cards.is_empty() {
        println!(
            "  {:<20}  {:<36}  {:<19}  {:>9}  {:>6}  {}",
            "Target", "File", "Observed", "Exposure", "Frames", "Flags"
        );
        println!("  {}", "-".repeat(110));
        for card in cards {
            println!(
                "  {:<20}  {:<36}  {:<19}  {:>9}  {:>6}  {}",
                card.target, card.filename, card.observed_at, card.exposure, card.frames, card.flags
            );
        }
        println!();
    }
    println!("  {}", s.title.apply_to(controller.summary()));
}
