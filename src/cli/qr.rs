//! CLI commands printing QR payload strings

use clap::Subcommand;

use crate::error::ExportResult;
use crate::qr::{Contact, QrPayload, WifiSecurity};

/// QR payload subcommands
#[derive(Subcommand, Debug)]
pub enum QrCommands {
    /// Web link (https:// is added when missing)
    Url { url: String },

    /// Free text
    Text { text: String },

    /// Pre-filled email
    Email {
        to: String,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        body: Option<String>,
    },

    /// Phone number to call
    Phone { number: String },

    /// Pre-filled text message
    Sms {
        number: String,
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Wi-Fi network credentials
    Wifi {
        ssid: String,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long, value_enum, default_value = "wpa")]
        security: WifiSecurity,
        #[arg(long)]
        hidden: bool,
    },

    /// Contact card (vCard 3.0)
    Contact {
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        organization: Option<String>,
        #[arg(long)]
        url: Option<String>,
    },
}

impl From<QrCommands> for QrPayload {
    fn from(cmd: QrCommands) -> Self {
        match cmd {
            QrCommands::Url { url } => Self::Url(url),
            QrCommands::Text { text } => Self::Text(text),
            QrCommands::Email { to, subject, body } => Self::Email { to, subject, body },
            QrCommands::Phone { number } => Self::Phone(number),
            QrCommands::Sms { number, message } => Self::Sms { number, message },
            QrCommands::Wifi {
                ssid,
                password,
                security,
                hidden,
            } => Self::Wifi {
                ssid,
                password,
                security,
                hidden,
            },
            QrCommands::Contact {
                name,
                phone,
                email,
                organization,
                url,
            } => Self::Contact(Contact {
                name,
                phone,
                email,
                organization,
                url,
            }),
        }
    }
}

/// Handle QR commands
pub fn handle_qr_command(cmd: QrCommands) -> ExportResult<()> {
    let payload = QrPayload::from(cmd).encode()?;
    println!("{}", payload);
    Ok(())
}
