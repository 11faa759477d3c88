use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};

#[test]
fn test_cli_emits_well_formed_balance_summary() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_card-ledger-engine");
    let cards_path = Path::new("samples").join("cards.csv");
    let ledger_path = Path::new("samples").join("ledger.csv");

    let output = Command::new(binary_path)
        .arg(cards_path)
        .arg(ledger_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let mut lines = stdout.lines();

    assert_eq!(lines.next(), Some("card,limit,balance,available,usage_percent"));

    for line in lines.filter(|line| !line.is_empty()) {
        let fields: Vec<&str> = line.split(',').collect();

        assert_eq!(fields.len(), 5);

        let _: u32 = fields[0].parse()?;
        let _: f64 = fields[1].parse()?;
        let _: f64 = fields[2].parse()?;
        let _: f64 = fields[3].parse()?;
        let _: f64 = fields[4].parse()?;
    }

    Ok(())
}

#[test]
fn test_cli_outputs_correct_balances_and_reminder_states() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_card-ledger-engine");
    let cards_path = Path::new("samples").join("cards.csv");
    let ledger_path = Path::new("samples").join("ledger.csv");
    let reminders_path = Path::new("samples").join("reminders.csv");

    let output = Command::new(binary_path)
        .arg(cards_path)
        .arg(ledger_path)
        .arg(reminders_path)
        .output()?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;

    let mut cards = HashMap::new();
    let mut reminders = HashMap::new();

    for line in stdout.lines() {
        let fields: Vec<&str> = line.split(',').collect();

        match fields.as_slice() {
            [card, limit, balance, available, usage] if *card != "card" => {
                cards.insert(card.to_string(), (limit.to_string(), balance.to_string(), available.to_string(), usage.to_string()));
            }
            [reminder, kind, remaining, active] if *reminder != "reminder" => {
                reminders.insert(reminder.to_string(), (kind.to_string(), remaining.to_string(), active.to_string()));
            }
            _ => {}
        }
    }

    // Visa: carry-over 3000, charge 500, settlement 1200 leaves 2300 owed;
    // the 9000 charge was rejected at the guard.
    let visa = cards.get("1").ok_or_else(|| anyhow!("card 1 missing from output"))?;
    assert_eq!(visa.1, "-2300");
    assert_eq!(visa.2, "7700");
    assert_eq!(visa.3, "23.00");

    // Mastercard: carry-over fully settled.
    let mastercard = cards.get("2").ok_or_else(|| anyhow!("card 2 missing from output"))?;
    assert_eq!(mastercard.1, "0");
    assert_eq!(mastercard.2, "5000");
    assert_eq!(mastercard.3, "0");

    // Two matches inside the 10..20 window: counted down and closed.
    let card_due = reminders.get("1").ok_or_else(|| anyhow!("reminder 1 missing from output"))?;
    assert_eq!(card_due, &("card_due".to_string(), "0".to_string(), "false".to_string()));

    // Repeating reminder counted its single by-card occurrence.
    let counterpart_due = reminders.get("2").ok_or_else(|| anyhow!("reminder 2 missing from output"))?;
    assert_eq!(counterpart_due, &("counterpart_due".to_string(), "1".to_string(), "true".to_string()));

    // General reminders pass through untouched.
    let general = reminders.get("3").ok_or_else(|| anyhow!("reminder 3 missing from output"))?;
    assert_eq!(general, &("general".to_string(), "5".to_string(), "true".to_string()));

    Ok(())
}
