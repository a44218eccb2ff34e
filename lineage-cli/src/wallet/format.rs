use console::Style;
use lineage_types::primitives::GenesisHash;

// ── Styles ──────────────────────────────────────────────────────────────────

pub fn style_success() -> Style {
    Style::new().green()
}

pub fn style_error() -> Style {
    Style::new().red()
}

pub fn style_warn() -> Style {
    Style::new().yellow()
}

pub fn style_info() -> Style {
    Style::new().cyan()
}

pub fn style_bold() -> Style {
    Style::new().bold()
}

pub fn style_dim() -> Style {
    Style::new().dim()
}

// ── Value formatting ────────────────────────────────────────────────────────

/// Truncated address: 0xab12...ef34
pub fn format_address_short(address: &str) -> String {
    let hex = address.strip_prefix("0x").unwrap_or(address);
    if hex.len() <= 12 {
        return address.to_string();
    }
    format!("0x{}...{}", &hex[..4], &hex[hex.len() - 4..])
}

/// Network label for a genesis hash: the configured name, else a short hash.
pub fn format_genesis(genesis: Option<&GenesisHash>, network_name: Option<&str>) -> String {
    match (genesis, network_name) {
        (_, Some(name)) => name.to_string(),
        (Some(hash), None) => {
            let hex = hex::encode(hash.as_bytes());
            format!("0x{}…", &hex[..8])
        }
        (None, None) => "any".to_string(),
    }
}

/// Unix seconds as a UTC timestamp.
pub fn format_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| chrono::DateTime::from_timestamp(s, 0))
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

// ── Display helpers ─────────────────────────────────────────────────────────

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("  {} {}", style_success().apply_to("✓"), msg);
}

/// Print an error message with a hint.
pub fn print_error(msg: &str, hint: Option<&str>) {
    eprintln!("  {} {}", style_error().apply_to("Error:"), msg);
    if let Some(h) = hint {
        eprintln!(
            "  {} {}",
            style_dim().apply_to("Hint:"),
            style_dim().apply_to(h)
        );
    }
}

/// Print an informational line.
pub fn print_info(label: &str, value: &str) {
    println!(
        "  {}: {}",
        style_bold().apply_to(label),
        style_info().apply_to(value)
    );
}

/// Print a wizard step header such as "Step 1 of 2 · Choose a path".
pub fn print_step(step: u8, total: u8, title: &str) {
    println!();
    println!(
        "  {} {}",
        style_dim().apply_to(format!("Step {} of {} ·", step, total)),
        style_bold().apply_to(title)
    );
    println!(
        "  {}",
        style_dim().apply_to("────────────────────────────────")
    );
}

/// Print the mnemonic in a warning box.
pub fn print_mnemonic_box(words: &[&str]) {
    let warn = style_warn();
    let bold = style_bold();
    const INNER: usize = 62;

    println!();
    println!("  {}", warn.apply_to(format!("╔{}╗", "═".repeat(INNER))));
    for line in [
        "IMPORTANT: Write down these words.",
        "They are the ONLY way to recover this account",
        "and every account derived from it. Store them offline.",
    ] {
        println!(
            "  {}",
            warn.apply_to(format!("║  {:<width$}║", line, width = INNER - 2))
        );
    }
    println!("  {}", warn.apply_to(format!("╠{}╣", "═".repeat(INNER))));

    // Rows of 4, numbered from 1.
    for (row_idx, row) in words.chunks(4).enumerate() {
        let entries: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, word)| format!("{:>2}. {:<10}", row_idx * 4 + i + 1, word))
            .collect();
        let content = format!(" {}", entries.join(" "));
        println!(
            "  {}",
            bold.apply_to(format!("║{:<width$}║", content, width = INNER))
        );
    }

    println!("  {}", warn.apply_to(format!("╚{}╝", "═".repeat(INNER))));
    println!();
}
