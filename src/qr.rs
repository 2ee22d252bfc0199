//! QR code payload strings
//!
//! Builds the text a QR encoder receives for the common payload kinds: web
//! links, mail drafts, phone numbers, SMS, Wi-Fi credentials and contact
//! cards. Drawing the QR matrix is left to whatever renders the string.

use crate::error::{ExportError, ExportResult};

/// Wi-Fi authentication type as written in `WIFI:T:...;`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WifiSecurity {
    #[default]
    Wpa,
    Wep,
    /// Open network
    Nopass,
}

impl WifiSecurity {
    fn token(self) -> &'static str {
        match self {
            Self::Wpa => "WPA",
            Self::Wep => "WEP",
            Self::Nopass => "nopass",
        }
    }
}

/// Contact card fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub url: Option<String>,
}

/// Something to put in a QR code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrPayload {
    Url(String),
    Text(String),
    Email {
        to: String,
        subject: Option<String>,
        body: Option<String>,
    },
    Phone(String),
    Sms {
        number: String,
        message: Option<String>,
    },
    Wifi {
        ssid: String,
        password: Option<String>,
        security: WifiSecurity,
        hidden: bool,
    },
    Contact(Contact),
}

impl QrPayload {
    /// The payload string handed to a QR encoder
    pub fn encode(&self) -> ExportResult<String> {
        match self {
            Self::Url(url) => {
                let url = required(url, "URL")?;
                if url.contains("://") || url.starts_with("mailto:") {
                    Ok(url.to_string())
                } else {
                    Ok(format!("https://{}", url))
                }
            }
            Self::Text(text) => {
                if text.is_empty() {
                    return Err(ExportError::malformed("QR text is empty"));
                }
                Ok(text.clone())
            }
            Self::Email { to, subject, body } => {
                let to = required(to, "email address")?;
                let query: Vec<String> = [("subject", subject), ("body", body)]
                    .into_iter()
                    .filter_map(|(key, value)| {
                        value
                            .as_deref()
                            .filter(|v| !v.is_empty())
                            .map(|v| format!("{}={}", key, urlencoding::encode(v)))
                    })
                    .collect();
                if query.is_empty() {
                    Ok(format!("mailto:{}", to))
                } else {
                    Ok(format!("mailto:{}?{}", to, query.join("&")))
                }
            }
            Self::Phone(number) => Ok(format!("tel:{}", compact_number(required(number, "phone number")?))),
            Self::Sms { number, message } => Ok(format!(
                "SMSTO:{}:{}",
                compact_number(required(number, "phone number")?),
                message.as_deref().unwrap_or("")
            )),
            Self::Wifi {
                ssid,
                password,
                security,
                hidden,
            } => {
                let ssid = required(ssid, "network name")?;
                let mut out = format!("WIFI:T:{};S:{};", security.token(), escape_wifi(ssid));
                if *security != WifiSecurity::Nopass {
                    let password = password
                        .as_deref()
                        .filter(|p| !p.is_empty())
                        .ok_or_else(|| ExportError::malformed("secured network needs a password"))?;
                    out.push_str(&format!("P:{};", escape_wifi(password)));
                }
                if *hidden {
                    out.push_str("H:true;");
                }
                out.push(';');
                Ok(out)
            }
            Self::Contact(contact) => encode_vcard(contact),
        }
    }
}

fn required<'a>(value: &'a str, what: &str) -> ExportResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ExportError::malformed(format!("QR {} is empty", what)));
    }
    Ok(value)
}

/// Drop spaces, dots and dashes people type into phone numbers
fn compact_number(number: &str) -> String {
    number
        .chars()
        .filter(|c| !matches!(*c, ' ' | '.' | '-' | '(' | ')'))
        .collect()
}

fn escape_wifi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ',' | ':' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn escape_vcard(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(';', "\\;")
        .replace(',', "\\,")
        .replace('\n', "\\n")
}

fn encode_vcard(contact: &Contact) -> ExportResult<String> {
    let name = required(&contact.name, "contact name")?;

    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", escape_vcard(name)),
    ];
    // N is family;given, best effort from the display name
    let (given, family) = name.rsplit_once(' ').unwrap_or((name, ""));
    lines.push(format!("N:{};{};;;", escape_vcard(family), escape_vcard(given)));

    let optional = [
        ("ORG", &contact.organization),
        ("TEL", &contact.phone),
        ("EMAIL", &contact.email),
        ("URL", &contact.url),
    ];
    for (tag, value) in optional {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("{}:{}", tag, escape_vcard(value)));
        }
    }
    lines.push("END:VCARD".to_string());

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_gets_scheme() {
        assert_eq!(
            QrPayload::Url("zen-commerce.sn".into()).encode().unwrap(),
            "https://zen-commerce.sn"
        );
        assert_eq!(
            QrPayload::Url("http://example.com/a".into()).encode().unwrap(),
            "http://example.com/a"
        );
    }

    #[test]
    fn test_email_query_is_percent_encoded() {
        let payload = QrPayload::Email {
            to: "contact@zen.sn".into(),
            subject: Some("Commande n°12".into()),
            body: Some("Bonjour & merci".into()),
        };
        assert_eq!(
            payload.encode().unwrap(),
            "mailto:contact@zen.sn?subject=Commande%20n%C2%B012&body=Bonjour%20%26%20merci"
        );

        let bare = QrPayload::Email {
            to: "contact@zen.sn".into(),
            subject: None,
            body: Some(String::new()),
        };
        assert_eq!(bare.encode().unwrap(), "mailto:contact@zen.sn");
    }

    #[test]
    fn test_phone_and_sms() {
        assert_eq!(
            QrPayload::Phone("+221 77 000-00.00".into()).encode().unwrap(),
            "tel:+221770000000"
        );
        let sms = QrPayload::Sms {
            number: "+221 77 000 00 00".into(),
            message: Some("Votre colis est prêt".into()),
        };
        assert_eq!(sms.encode().unwrap(), "SMSTO:+221770000000:Votre colis est prêt");
    }

    #[test]
    fn test_wifi_escaping() {
        let wifi = QrPayload::Wifi {
            ssid: "Zen;Shop".into(),
            password: Some("p:a\"ss".into()),
            security: WifiSecurity::Wpa,
            hidden: true,
        };
        assert_eq!(wifi.encode().unwrap(), "WIFI:T:WPA;S:Zen\\;Shop;P:p\\:a\\\"ss;H:true;;");
    }

    #[test]
    fn test_open_wifi_has_no_password() {
        let wifi = QrPayload::Wifi {
            ssid: "Guest".into(),
            password: Some("ignored".into()),
            security: WifiSecurity::Nopass,
            hidden: false,
        };
        assert_eq!(wifi.encode().unwrap(), "WIFI:T:nopass;S:Guest;;");
    }

    #[test]
    fn test_secured_wifi_requires_password() {
        let wifi = QrPayload::Wifi {
            ssid: "Office".into(),
            password: None,
            security: WifiSecurity::Wep,
            hidden: false,
        };
        assert!(wifi.encode().unwrap_err().is_malformed_input());
    }

    #[test]
    fn test_vcard() {
        let contact = QrPayload::Contact(Contact {
            name: "Awa Diop".into(),
            phone: Some("+221770000000".into()),
            email: Some("awa@zen.sn".into()),
            organization: Some("Zen, SARL".into()),
            url: None,
        });
        let card = contact.encode().unwrap();
        let lines: Vec<&str> = card.lines().collect();
        assert_eq!(lines[0], "BEGIN:VCARD");
        assert_eq!(lines[1], "VERSION:3.0");
        assert_eq!(lines[2], "FN:Awa Diop");
        assert_eq!(lines[3], "N:Diop;Awa;;;");
        assert!(lines.contains(&"ORG:Zen\\, SARL"));
        assert!(!card.contains("URL:"));
        assert_eq!(*lines.last().unwrap(), "END:VCARD");
    }

    #[test]
    fn test_empty_required_fields() {
        assert!(QrPayload::Url("  ".into()).encode().unwrap_err().is_malformed_input());
        assert!(QrPayload::Text(String::new()).encode().is_err());
        assert!(QrPayload::Contact(Contact::default()).encode().is_err());
    }
}
