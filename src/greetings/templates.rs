//! Greeting texts: plain WhatsApp bodies and HTML emails.

use super::services::Occasion;
use crate::{
    customers::Customer,
    notify::{Channel, RenderedMessage},
};

const STUDIO_NAME: &str = "Ram Photo Studio";
const STUDIO_ADDRESS: &str = "Near Peeli Kothi, Circular Road, Hathras - 204101";
const STUDIO_PHONES: &str = "91-5722-297297 | 91-9412733288";
const STUDIO_EMAIL: &str = "ramdigitalphotostudio@gmail.com";

struct Palette {
    from: &'static str,
    to: &'static str,
}

const BIRTHDAY_PALETTE: Palette = Palette { from: "#FFD700", to: "#FFA500" };
const ANNIVERSARY_PALETTE: Palette = Palette { from: "#FF69B4", to: "#FF1493" };

/// Render the greeting for `customer` in the shape `channel` expects.
pub fn render(channel: Channel, occasion: Occasion, customer: &Customer) -> RenderedMessage {
    let spouse = customer.spouse_name.as_deref().filter(|s| !s.trim().is_empty());
    match (channel, occasion) {
        (Channel::WhatsApp, Occasion::Birthday) => RenderedMessage {
            subject: None,
            body: birthday_whatsapp(&customer.name),
        },
        (Channel::WhatsApp, Occasion::Anniversary) => RenderedMessage {
            subject: None,
            body: anniversary_whatsapp(&customer.name, spouse),
        },
        (Channel::Email, Occasion::Birthday) => RenderedMessage {
            subject: Some(format!("🎉 Happy Birthday {}!", customer.name)),
            body: birthday_email_html(&customer.name),
        },
        (Channel::Email, Occasion::Anniversary) => RenderedMessage {
            subject: Some(format!("💕 Happy Anniversary {}!", customer.name)),
            body: anniversary_email_html(&customer.name, spouse),
        },
    }
}

pub fn birthday_whatsapp(name: &str) -> String {
    format!(
        "🎉 *Happy Birthday {name}!* 🎂

Wishing you a day filled with joy, laughter, and wonderful memories!

May this year bring you success, happiness, and all the things you've been dreaming of.

Warm wishes from,
*{STUDIO_NAME}* 📸

_Capturing your precious moments since years!_"
    )
}

pub fn anniversary_whatsapp(name: &str, spouse_name: Option<&str>) -> String {
    let couple = match spouse_name {
        Some(spouse) => format!("{name} & {spouse}"),
        None => name.to_string(),
    };
    format!(
        "💕 *Happy Anniversary {couple}!* 💑

Wishing you both a beautiful day filled with love and cherished memories!

May your bond grow stronger with each passing year, and may you continue to create wonderful moments together.

Warm wishes from,
*{STUDIO_NAME}* 📸

_Capturing your love story, one frame at a time!_"
    )
}

pub fn birthday_email_html(name: &str) -> String {
    let salutation = format!("Dear <strong>{}</strong>,", escape_html(name));
    email_html(
        "Happy Birthday!",
        "🎉 Happy Birthday! 🎉",
        &BIRTHDAY_PALETTE,
        &salutation,
        &[
            "Wishing you a very Happy Birthday! 🎂",
            "May this special day bring you joy, happiness, and wonderful memories. We hope your \
             day is filled with love, laughter, and everything that makes you smile.",
            "Thank you for being a valued part of the Ram Photo Studio family. We look forward to \
             capturing more beautiful moments with you!",
        ],
        "Have a wonderful day! 🎈",
    )
}

pub fn anniversary_email_html(name: &str, spouse_name: Option<&str>) -> String {
    let salutation = match spouse_name {
        Some(spouse) => format!("Dear {} and {},", escape_html(name), escape_html(spouse)),
        None => format!("Dear {},", escape_html(name)),
    };
    email_html(
        "Happy Anniversary!",
        "💕 Happy Anniversary! 💕",
        &ANNIVERSARY_PALETTE,
        &salutation,
        &[
            "Wishing you a very Happy Anniversary! 💐",
            "May your love continue to grow stronger with each passing year. Here's to many more \
             years of happiness, laughter, and beautiful memories together.",
            "Thank you for being a valued part of the Ram Photo Studio family. We feel honored to \
             have been part of your journey!",
        ],
        "Celebrate your love! ❤️",
    )
}

fn email_html(
    title: &str,
    heading: &str,
    palette: &Palette,
    salutation: &str,
    paragraphs: &[&str],
    banner: &str,
) -> String {
    let gradient = format!("linear-gradient(135deg, {} 0%, {} 100%)", palette.from, palette.to);
    let body: String = paragraphs
        .iter()
        .map(|p| {
            format!(
                r#"
                            <p style="margin: 0 0 20px; color: #555555; font-size: 16px; line-height: 1.6;">{p}</p>"#
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body style="margin: 0; padding: 0; font-family: 'Arial', sans-serif; background-color: #f5f5f5;">
    <table role="presentation" style="width: 100%; border-collapse: collapse;">
        <tr>
            <td align="center" style="padding: 40px 0;">
                <table role="presentation" style="width: 600px; max-width: 100%; background-color: #ffffff; border-radius: 12px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1);">
                    <tr>
                        <td style="padding: 40px 40px 20px; text-align: center; background: {gradient}; border-radius: 12px 12px 0 0;">
                            <h1 style="margin: 0; color: #ffffff; font-size: 32px; font-weight: bold; text-shadow: 2px 2px 4px rgba(0,0,0,0.2);">{heading}</h1>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 40px;">
                            <p style="margin: 0 0 20px; color: #333333; font-size: 18px; line-height: 1.6;">{salutation}</p>{body}
                            <div style="text-align: center; margin: 30px 0;">
                                <div style="display: inline-block; padding: 20px 30px; background: {gradient}; border-radius: 8px;">
                                    <p style="margin: 0; color: #ffffff; font-size: 20px; font-weight: bold;">{banner}</p>
                                </div>
                            </div>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 30px 40px; background-color: #f8f8f8; border-radius: 0 0 12px 12px; text-align: center;">
                            <p style="margin: 0 0 10px; color: #666666; font-size: 14px;"><strong>{STUDIO_NAME}</strong></p>
                            <p style="margin: 0 0 5px; color: #888888; font-size: 13px;">{STUDIO_ADDRESS}</p>
                            <p style="margin: 0 0 5px; color: #888888; font-size: 13px;">📞 {STUDIO_PHONES}</p>
                            <p style="margin: 0; color: #888888; font-size: 13px;">📧 {STUDIO_EMAIL}</p>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>
"#
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
