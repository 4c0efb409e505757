use crate::config::{Config, Mode};
use crate::pipeline::{derive_output_path, DimensionSource, JobConfig, StyleOverrides};
use crate::style::{ChatPreset, NamedColour};
use console::style;
use dialoguer::{Confirm, FuzzySelect, Input, Select};
use std::fs;
use std::path::{Path, PathBuf};

const SUBTITLE_EXTENSIONS: &[&str] = &["lrc", "srt", "vtt", "txt"];

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "flv"];

pub struct InteractiveResult {
    pub job: JobConfig,
    pub config: Config,
}

pub fn run_interactive_wizard() -> anyhow::Result<InteractiveResult> {
    print_header();

    let mut config = Config::load().unwrap_or_default();

    // Step 1: Source file
    let input = select_file(
        "Select subtitle source:",
        SUBTITLE_EXTENSIONS,
        "No .lrc/.srt/.vtt/.txt files found in current directory.",
    )?;

    // Step 2: Layout mode
    let mode = select_mode(config.default_mode)?;

    // Step 3: Mode-specific style choices
    let mut overrides = StyleOverrides::default();
    if mode == Mode::Chat {
        overrides.preset = Some(select_preset()?);
    }
    overrides.colour = select_colour()?;

    // Step 4: Video or fixed dimensions
    let dimensions = select_dimensions(mode)?;

    // Step 5: Optional preview frame
    let preview = match &dimensions {
        DimensionSource::Video(_) => {
            if Confirm::new()
                .with_prompt("Render a preview frame?")
                .default(false)
                .interact()?
            {
                Some(input.with_file_name(format!(
                    "{}_{}_preview.png",
                    input.file_stem().unwrap_or_default().to_string_lossy(),
                    mode
                )))
            } else {
                None
            }
        }
        DimensionSource::Fixed { .. } => None,
    };

    let base_config = config.clone();
    overrides.apply(&mut config, mode);
    let output = derive_output_path(&input, mode);

    // Step 6: Confirm
    print_summary(&input, &output, mode, &dimensions, &config);

    if !Confirm::new()
        .with_prompt("Proceed with these settings?")
        .default(true)
        .interact()?
    {
        anyhow::bail!("Cancelled by user");
    }

    if mode != config.default_mode
        && Confirm::new()
            .with_prompt(format!("Make '{}' the default mode?", mode))
            .default(false)
            .interact()?
    {
        config.default_mode = mode;
        save_config(&with_default_mode(&base_config, mode))?;
        println!("{} Settings saved to config\n", style("✓").green());
    }

    println!();

    Ok(InteractiveResult {
        job: JobConfig {
            mode,
            input,
            output,
            dimensions,
            preview,
            show_progress: true,
        },
        config,
    })
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║         assgen - ASS Subtitle Layout Builder      ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!();
}

/// The config as loaded, with only the default mode changed. Per-run style
/// choices are not persisted.
fn with_default_mode(base: &Config, mode: Mode) -> Config {
    Config {
        default_mode: mode,
        ..base.clone()
    }
}

fn save_config(config: &Config) -> anyhow::Result<()> {
    if let Some(config_path) = Config::config_file_path() {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_content = toml::to_string_pretty(config)?;
        fs::write(config_path, toml_content)?;
    }
    Ok(())
}

fn select_file(prompt: &str, extensions: &[&str], none_found: &str) -> anyhow::Result<PathBuf> {
    println!("\n{}", style(prompt).bold());

    let files = scan_files(".", extensions)?;

    if files.is_empty() {
        println!("  {}\n", none_found);
        return prompt_existing_path();
    }

    let mut items: Vec<String> = files
        .iter()
        .map(|f| {
            let size = fs::metadata(f)
                .map(|m| format_size(m.len()))
                .unwrap_or_else(|_| "?".to_string());
            format!("{} ({})", f.display(), size)
        })
        .collect();
    items.push("Enter custom path...".to_string());

    let selection = FuzzySelect::new()
        .with_prompt("Choose a file")
        .items(&items)
        .default(0)
        .interact()?;

    if selection == files.len() {
        prompt_existing_path()
    } else {
        Ok(files[selection].clone())
    }
}

fn prompt_existing_path() -> anyhow::Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("Enter file path")
        .interact_text()?;
    let path = PathBuf::from(path.trim());
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Ok(path)
}

fn scan_files(dir: &str, extensions: &[&str]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extensions) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn select_mode(default: Mode) -> anyhow::Result<Mode> {
    let modes = [
        (Mode::Canvas, "Vertical video, text in a side panel"),
        (Mode::Horizontal, "Horizontal video, bottom-centred lines"),
        (Mode::Chat, "Scrolling chat box overlay"),
    ];

    let items: Vec<String> = modes
        .iter()
        .map(|(mode, desc)| format!("{} - {}", mode, desc))
        .collect();
    let default_idx = modes.iter().position(|(m, _)| *m == default).unwrap_or(0);

    let selection = Select::new()
        .with_prompt("Select layout mode")
        .items(&items)
        .default(default_idx)
        .interact()?;

    Ok(modes[selection].0)
}

fn select_preset() -> anyhow::Result<ChatPreset> {
    let presets = [ChatPreset::Bilibili, ChatPreset::Weibo];
    let items: Vec<String> = presets
        .iter()
        .map(|p| {
            let s = p.style();
            format!(
                "{} (font {}px, box {:.0}% of height)",
                p,
                s.font_size,
                s.chatbox_max_height_ratio * 100.0
            )
        })
        .collect();

    let selection = Select::new()
        .with_prompt("Select chat preset")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(presets[selection])
}

/// `None` keeps the configured colour.
fn select_colour() -> anyhow::Result<Option<String>> {
    let mut items = vec!["Keep configured colour".to_string()];
    items.extend(NamedColour::ALL.iter().map(|c| c.to_string()));

    let selection = Select::new()
        .with_prompt("Text colour")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selection
        .checked_sub(1)
        .map(|i| NamedColour::ALL[i].ass_code().to_string()))
}

fn select_dimensions(mode: Mode) -> anyhow::Result<DimensionSource> {
    let use_video = Select::new()
        .with_prompt("Video size")
        .items(&["Read from a video file", "Enter width and height"])
        .default(0)
        .interact()?
        == 0;

    if use_video {
        let video = select_file(
            "Select video:",
            VIDEO_EXTENSIONS,
            "No video files found in current directory.",
        )?;
        return Ok(DimensionSource::Video(video));
    }

    let (default_w, default_h) = match mode {
        Mode::Horizontal => (1920, 1080),
        Mode::Canvas | Mode::Chat => (1080, 1920),
    };

    let width: u32 = Input::new()
        .with_prompt("Video width")
        .default(default_w)
        .interact_text()?;
    let height: u32 = Input::new()
        .with_prompt("Video height")
        .default(default_h)
        .interact_text()?;

    Ok(DimensionSource::Fixed { width, height })
}

fn print_summary(
    input: &Path,
    output: &Path,
    mode: Mode,
    dimensions: &DimensionSource,
    config: &Config,
) {
    println!("\n{}", style("═══ Summary ═══").bold());
    println!("  Input:     {}", style(input.display()).cyan());
    println!("  Output:    {}", style(output.display()).cyan());
    println!("  Mode:      {}", mode);
    match dimensions {
        DimensionSource::Video(path) => println!("  Video:     {}", path.display()),
        DimensionSource::Fixed { width, height } => {
            println!("  Video:     {}x{}", width, height)
        }
    }
    let (font, size) = match mode {
        Mode::Canvas => (&config.canvas.font_name, config.canvas.font_size),
        Mode::Horizontal => (&config.horizontal.font_name, config.horizontal.font_size),
        Mode::Chat => (&config.chat.font_name, config.chat.font_size),
    };
    println!("  Font:      {} {}px", font, size);
    println!();
}
