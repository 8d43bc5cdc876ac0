use std::fmt;

use serde::{ser::SerializeMap, Serialize, Serializer};
use time::{macros::offset, Date, Month, OffsetDateTime, UtcOffset};
use tracing::{error, info};

use super::templates;
use crate::{
    customers::{Customer, CustomerStore, SortOrder},
    notify::{Channel, Notifier},
};

/// The studio's local time (IST) as a fixed offset.
pub const STUDIO_OFFSET: UtcOffset = offset!(+5:30);

/// Calendar day without a year, used to match birthdays and anniversaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: Month,
    pub day: u8,
}

impl MonthDay {
    pub fn of(date: Date) -> Self {
        Self { month: date.month(), day: date.day() }
    }

    /// Today's date in the studio's offset.
    pub fn today(now: OffsetDateTime) -> Self {
        Self::of(now.to_offset(STUDIO_OFFSET).date())
    }

    pub fn matches(self, date: Option<Date>) -> bool {
        date.is_some_and(|d| Self::of(d) == self)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month as u8, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occasion {
    Birthday,
    Anniversary,
}

impl Occasion {
    pub const ALL: [Occasion; 2] = [Occasion::Birthday, Occasion::Anniversary];

    fn date_of(self, c: &Customer) -> Option<Date> {
        match self {
            Occasion::Birthday => c.birthday,
            Occasion::Anniversary => c.anniversary,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Occasion::Birthday => "Birthday",
            Occasion::Anniversary => "Anniversary",
        }
    }
}

/// Contact address the channel delivers to; blank counts as missing.
pub fn contact_for(channel: Channel, c: &Customer) -> Option<&str> {
    let raw = match channel {
        Channel::Email => c.email.as_deref(),
        Channel::WhatsApp => Some(c.phone.as_str()),
    };
    raw.map(str::trim).filter(|v| !v.is_empty())
}

/// Outcome of one greetings run. Serialises with channel-specific keys
/// (`emailsSent`/`emails` or `messagesSent`/`messages`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingsReport {
    pub date: MonthDay,
    pub channel: Channel,
    pub sent: Vec<String>,
    pub errors: Vec<String>,
}

impl Serialize for GreetingsReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (count_key, list_key) = match self.channel {
            Channel::Email => ("emailsSent", "emails"),
            Channel::WhatsApp => ("messagesSent", "messages"),
        };
        let len = if self.errors.is_empty() { 4 } else { 5 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("success", &true)?;
        map.serialize_entry("date", &self.date.to_string())?;
        map.serialize_entry(count_key, &self.sent.len())?;
        map.serialize_entry(list_key, &self.sent)?;
        if !self.errors.is_empty() {
            map.serialize_entry("errors", &self.errors)?;
        }
        map.end()
    }
}

/// Scan every customer and send the greetings due on `today`. Individual send
/// failures are collected into the report; only the customer fetch can fail the run.
pub async fn send_greetings(
    customers: &dyn CustomerStore,
    notifier: &dyn Notifier,
    today: MonthDay,
) -> anyhow::Result<GreetingsReport> {
    let channel = notifier.channel();
    info!(date = %today, %channel, "checking for events");

    let rows = customers.list(SortOrder::Oldest).await?;

    let mut report = GreetingsReport {
        date: today,
        channel,
        sent: Vec::new(),
        errors: Vec::new(),
    };

    for customer in &rows {
        let Some(contact) = contact_for(channel, customer) else {
            continue;
        };

        for occasion in Occasion::ALL {
            if !today.matches(occasion.date_of(customer)) {
                continue;
            }

            let message = templates::render(channel, occasion, customer);
            match notifier.send(contact, &message).await {
                Ok(receipt) => {
                    info!(
                        customer_id = customer.id,
                        occasion = occasion.label(),
                        provider_id = %receipt.provider_id,
                        "greeting sent"
                    );
                    report.sent.push(format!(
                        "{} {} to {} ({})",
                        occasion.label(),
                        channel.noun(),
                        customer.name,
                        contact
                    ));
                }
                Err(e) => {
                    error!(
                        customer_id = customer.id,
                        occasion = occasion.label(),
                        error = %e,
                        "greeting failed"
                    );
                    report.errors.push(format!(
                        "Failed to send {} {} to {}: {}",
                        occasion.label().to_lowercase(),
                        channel.noun(),
                        customer.name,
                        e
                    ));
                }
            }
        }
    }

    info!(
        sent = report.sent.len(),
        failed = report.errors.len(),
        "greetings run finished"
    );
    Ok(report)
}
