use std::collections::{HashMap, HashSet};

use comfy_table::Cell;

use crate::wallet::error::WalletError;
use crate::wallet::format::{
    format_address_short, format_genesis, format_timestamp, style_bold, style_dim,
    style_success,
};
use crate::wallet::keystore::Keystore;
use crate::wallet::ui::{data_table, print_table};
use crate::wallet::WalletContext;

pub fn run(ctx: &WalletContext, json: bool) -> Result<(), WalletError> {
    let state = ctx.state()?;
    let accounts = ctx.store.list()?;

    if json {
        let entries: Vec<serde_json::Value> = accounts
            .iter()
            .map(|ks| {
                serde_json::json!({
                    "name": ks.name(),
                    "address": ks.address,
                    "parent_address": ks.file.parent_address,
                    "suri": ks.file.suri,
                    "genesis_hash": ks.file.genesis_hash,
                    "created_at": ks.file.created_at,
                    "active": state.is_active(&ks.address),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("  No accounts found.");
        println!(
            "  {}",
            style_dim().apply_to("Create one with: lineage create --name <NAME>")
        );
        return Ok(());
    }

    let names: HashMap<&str, &str> = accounts
        .iter()
        .map(|ks| (ks.address.as_str(), ks.name()))
        .collect();

    println!();
    println!("  {}", style_bold().apply_to("Accounts"));
    let mut table = data_table(&["", "Name", "Address", "Parent", "Path", "Network", "Created"]);
    for ks in ordered(&accounts) {
        let marker = if state.is_active(&ks.address) {
            style_success().apply_to("▸").to_string()
        } else {
            String::new()
        };
        let parent = ks
            .file
            .parent_address
            .as_deref()
            .map(|p| {
                names
                    .get(p)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format_address_short(p))
            })
            .unwrap_or_default();
        let network = match &ks.file.genesis_hash {
            Some(g) => format_genesis(Some(g), ctx.config.network_name(g)),
            None => format_genesis(None, None),
        };
        table.add_row(vec![
            Cell::new(marker),
            Cell::new(ks.name()),
            Cell::new(&ks.address),
            Cell::new(parent),
            Cell::new(ks.file.suri.as_deref().unwrap_or("")),
            Cell::new(network),
            Cell::new(format_timestamp(ks.file.created_at)),
        ]);
    }
    print_table(&table);
    println!();

    Ok(())
}

/// Roots in creation order, each followed by its descendants depth first.
/// Accounts whose parent is missing are treated as roots.
fn ordered(accounts: &[Keystore]) -> Vec<&Keystore> {
    let known: HashMap<&str, usize> = accounts
        .iter()
        .enumerate()
        .map(|(i, ks)| (ks.address.as_str(), i))
        .collect();
    let mut children: HashMap<&str, Vec<&Keystore>> = HashMap::new();
    let mut roots = Vec::new();
    for ks in accounts {
        match ks.file.parent_address.as_deref() {
            Some(p) if known.contains_key(p) && p != ks.address => {
                children.entry(p).or_default().push(ks)
            }
            _ => roots.push(ks),
        }
    }

    let mut out = Vec::with_capacity(accounts.len());
    let mut seen = HashSet::new();
    let mut stack: Vec<&Keystore> = roots.into_iter().rev().collect();
    while let Some(ks) = stack.pop() {
        if !seen.insert(ks.address.as_str()) {
            continue;
        }
        out.push(ks);
        if let Some(kids) = children.get(ks.address.as_str()) {
            stack.extend(kids.iter().rev().copied());
        }
    }
    // Anything left sits on a parent cycle.
    out.extend(accounts.iter().filter(|ks| !seen.contains(ks.address.as_str())));
    out
}
