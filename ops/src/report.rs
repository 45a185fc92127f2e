// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Donation table health report

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

use crate::supabase::Donation;

/// Status a donation needs before it shows up for recipients
pub const SUCCESSFUL: &str = "successful";
const NOT_AVAILABLE: &str = "N/A";
const RULER_WIDTH: usize = 80;

#[derive(Debug, PartialEq)]
pub struct DonationReport<'a> {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub with_coordinates: usize,
    pub successful: Vec<&'a Donation>,
    pub missing_coordinates: Vec<&'a Donation>,
}

pub fn summarize(donations: &[Donation]) -> DonationReport<'_> {
    let mut by_status = BTreeMap::new();
    for donation in donations {
        let status = donation.status.clone().unwrap_or_else(|| "unknown".to_string());
        *by_status.entry(status).or_insert(0) += 1;
    }

    let missing_coordinates: Vec<&Donation> =
        donations.iter().filter(|d| !d.has_coordinates()).collect();

    DonationReport {
        total: donations.len(),
        by_status,
        with_coordinates: donations.len() - missing_coordinates.len(),
        successful: donations
            .iter()
            .filter(|d| d.status.as_deref() == Some(SUCCESSFUL))
            .collect(),
        missing_coordinates,
    }
}

fn or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

fn json_text(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => NOT_AVAILABLE.to_string(),
        Some(serde_json::Value::String(s)) => or_na(Some(s.as_str())).to_string(),
        Some(other) => other.to_string(),
    }
}

fn local_time(value: Option<&str>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

fn quantity(donation: &Donation) -> String {
    let amount = match donation.quantity.as_ref() {
        None | Some(serde_json::Value::Null) => "0".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    let unit = match donation.unit.as_deref() {
        Some(u) if !u.is_empty() => u,
        _ => "servings",
    };
    format!("{} {}", amount, unit)
}

fn gps(donation: &Donation) -> String {
    match (donation.pickup_latitude, donation.pickup_longitude) {
        (Some(lat), Some(lon)) if donation.has_coordinates() => format!("{}, {}", lat, lon),
        _ => "❌ Not available".to_string(),
    }
}

fn contact(donation: &Donation) -> &str {
    donation
        .contact_person_name
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(donation.contact_person.as_deref())
        .map(|s| or_na(Some(s)))
        .unwrap_or(NOT_AVAILABLE)
}

/// Render the report the way `check-donations` prints it
pub fn render(report: &DonationReport<'_>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut out, report);
    out
}

fn write_report(out: &mut String, report: &DonationReport<'_>) -> fmt::Result {
    let ruler = "=".repeat(RULER_WIDTH);

    if report.total == 0 {
        writeln!(out, "⚠️ No donations found in database")?;
        return Ok(());
    }

    writeln!(out, "✅ Found {} total donations\n", report.total)?;
    writeln!(out, "{}", ruler)?;

    writeln!(out, "📊 By Status:")?;
    for (status, count) in &report.by_status {
        writeln!(out, "   {}: {}", status, count)?;
    }
    writeln!(out)?;

    writeln!(out, "📍 Location Data:")?;
    writeln!(out, "   With GPS coordinates: {}", report.with_coordinates)?;
    writeln!(
        out,
        "   Without GPS coordinates: {}",
        report.missing_coordinates.len()
    )?;
    writeln!(out)?;

    if report.successful.is_empty() {
        writeln!(out, "⚠️ No successful donations found")?;
        writeln!(
            out,
            "   Donations need status=\"{}\" to appear on recipient dashboard",
            SUCCESSFUL
        )?;
    } else {
        writeln!(out, "✅ Successful Donations ({}):\n", report.successful.len())?;
        writeln!(out, "{}", ruler)?;
        for (idx, d) in report.successful.iter().enumerate() {
            writeln!(
                out,
                "\n{}. {} (ID: {})",
                idx + 1,
                d.food_name.as_deref().filter(|s| !s.is_empty()).unwrap_or("Unnamed Food"),
                json_text(Some(&d.id))
            )?;
            writeln!(out, "   Type: {}", or_na(d.food_type.as_deref()))?;
            writeln!(out, "   Quantity: {}", quantity(d))?;
            writeln!(out, "   Dietary: {}", or_na(d.dietary_type.as_deref()))?;
            writeln!(out, "   Spice: {}", or_na(d.spice_level.as_deref()))?;
            writeln!(
                out,
                "   Location: {}, {}",
                or_na(d.pickup_city.as_deref()),
                or_na(d.pickup_state.as_deref())
            )?;
            writeln!(out, "   Address: {}", or_na(d.pickup_street_address.as_deref()))?;
            writeln!(out, "   Pin Code: {}", json_text(d.pickup_pin_code.as_ref()))?;
            writeln!(out, "   GPS: {}", gps(d))?;
            writeln!(
                out,
                "   Contact: {} - {}",
                contact(d),
                or_na(d.contact_phone.as_deref())
            )?;
            writeln!(out, "   Posted: {}", local_time(d.created_at.as_deref()))?;
            writeln!(out, "   Expires: {}", local_time(d.expiry_datetime.as_deref()))?;
        }
        writeln!(out, "\n{}", ruler)?;
    }

    if !report.missing_coordinates.is_empty() {
        writeln!(
            out,
            "\n📍 Donations Missing GPS Coordinates ({}):\n",
            report.missing_coordinates.len()
        )?;
        for d in &report.missing_coordinates {
            writeln!(
                out,
                "   • {} (ID: {}) - {}",
                d.food_name.as_deref().filter(|s| !s.is_empty()).unwrap_or("Unnamed"),
                json_text(Some(&d.id)),
                d.status.as_deref().unwrap_or("unknown")
            )?;
            writeln!(
                out,
                "     Address: {}, {}, {}",
                or_na(d.pickup_street_address.as_deref()),
                or_na(d.pickup_city.as_deref()),
                json_text(d.pickup_pin_code.as_ref())
            )?;
        }
        writeln!(
            out,
            "\n💡 Tip: These donations will show on dashboard but without distance calculations"
        )?;
        writeln!(out, "   To fix: Re-post these donations with GPS location enabled")?;
    }

    Ok(())
}
