//! # Field Schema Registry
//!
//! Static domain knowledge: which content types exist and which input
//! fields each of them carries. The form renderer, the validator and the
//! payload normalizer all consult this registry; none of them hard-codes
//! a field list of its own.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// All available content types, in display order.
pub const QR_TYPES: &[QrType] = &[
    QrType::Url,
    QrType::Text,
    QrType::Email,
    QrType::Phone,
    QrType::Sms,
    QrType::Wifi,
    QrType::Vcard,
    QrType::Mecard,
    QrType::Geo,
    QrType::Event,
    QrType::Bitcoin,
    QrType::Whatsapp,
];

/// The content category encoded into the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QrType {
    Url,
    Text,
    Email,
    Phone,
    Sms,
    Wifi,
    Vcard,
    Mecard,
    Geo,
    Event,
    Bitcoin,
    Whatsapp,
}

impl QrType {
    /// Wire name (lowercase, e.g. "wifi").
    pub fn as_str(&self) -> &'static str {
        match self {
            QrType::Url => "url",
            QrType::Text => "text",
            QrType::Email => "email",
            QrType::Phone => "phone",
            QrType::Sms => "sms",
            QrType::Wifi => "wifi",
            QrType::Vcard => "vcard",
            QrType::Mecard => "mecard",
            QrType::Geo => "geo",
            QrType::Event => "event",
            QrType::Bitcoin => "bitcoin",
            QrType::Whatsapp => "whatsapp",
        }
    }

    /// Human-readable label for pickers and listings.
    pub fn label(&self) -> &'static str {
        match self {
            QrType::Url => "URL",
            QrType::Text => "Text",
            QrType::Email => "Email",
            QrType::Phone => "Phone Number",
            QrType::Sms => "SMS",
            QrType::Wifi => "WiFi",
            QrType::Vcard => "VCard",
            QrType::Mecard => "MeCard",
            QrType::Geo => "Location",
            QrType::Event => "Event",
            QrType::Bitcoin => "Bitcoin",
            QrType::Whatsapp => "WhatsApp",
        }
    }

    /// Path segment of the generation endpoint. The service exposes the
    /// phone type under "phonenumber"; every other type matches its wire
    /// name.
    pub fn endpoint(&self) -> &'static str {
        match self {
            QrType::Phone => "phonenumber",
            other => other.as_str(),
        }
    }

    /// Look up a type by wire name.
    pub fn parse(name: &str) -> Option<QrType> {
        QR_TYPES
            .iter()
            .copied()
            .find(|ty| ty.as_str() == name.to_lowercase())
    }
}

impl fmt::Display for QrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QrType::parse(s).ok_or_else(|| format!("unknown content type '{s}'"))
    }
}

/// Input widget kind for a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Tel,
    Url,
    Password,
    Number,
    Select,
    DateTime,
    Color,
    Range,
    File,
}

impl FieldKind {
    /// Binary-upload kinds are never persisted by the options store.
    pub fn is_file(&self) -> bool {
        matches!(self, FieldKind::File)
    }
}

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Describes one input field of a form. List order is render and tab
/// order; names are unique within a type's list.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    pub label: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl FieldDescriptor {
    fn new(name: &'static str, kind: FieldKind, label: &'static str) -> Self {
        Self {
            name,
            kind,
            label,
            required: false,
            options: Vec::new(),
            step: None,
            min: None,
            max: None,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn options(mut self, options: &[(&'static str, &'static str)]) -> Self {
        self.options = options
            .iter()
            .map(|(value, label)| SelectOption { value, label })
            .collect();
        self
    }

    fn step(mut self, step: &'static str) -> Self {
        self.step = Some(step);
        self
    }

    fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }
}

/// The input fields for one content type, in render order.
///
/// Total over the enumeration: every type has a fixed, non-empty list.
pub fn fields(ty: QrType) -> Vec<FieldDescriptor> {
    use FieldKind::*;

    match ty {
        QrType::Url => vec![FieldDescriptor::new("url", Text, "URL").required()],

        QrType::Text => vec![FieldDescriptor::new("text", TextArea, "Text").required()],

        QrType::Email => vec![
            FieldDescriptor::new("email", Email, "Email Address").required(),
            FieldDescriptor::new("subject", Text, "Subject"),
            FieldDescriptor::new("body", TextArea, "Message Body"),
        ],

        QrType::Phone => vec![FieldDescriptor::new("phone", Tel, "Phone Number").required()],

        QrType::Sms => vec![
            FieldDescriptor::new("phone_number", Tel, "Phone Number").required(),
            FieldDescriptor::new("message", TextArea, "Message"),
        ],

        QrType::Wifi => vec![
            FieldDescriptor::new("ssid", Text, "Network Name (SSID)").required(),
            FieldDescriptor::new("password", Password, "Password"),
            FieldDescriptor::new("encryption", Select, "Encryption")
                .options(&[("WPA", "WPA/WPA2"), ("WEP", "WEP"), ("nopass", "None")])
                .required(),
        ],

        QrType::Vcard => vec![
            FieldDescriptor::new("first_name", Text, "First Name").required(),
            FieldDescriptor::new("last_name", Text, "Last Name").required(),
            FieldDescriptor::new("phone", Tel, "Phone Number"),
            FieldDescriptor::new("mobile", Tel, "Mobile Number").required(),
            FieldDescriptor::new("email", Email, "Email").required(),
            FieldDescriptor::new("url", Url, "Website"),
            FieldDescriptor::new("organization", Text, "Organization"),
        ],

        QrType::Mecard => vec![
            FieldDescriptor::new("name", Text, "Name").required(),
            FieldDescriptor::new("reading", Text, "Name Reading"),
            FieldDescriptor::new("tel", Tel, "Phone Number").required(),
            FieldDescriptor::new("email", Email, "Email").required(),
            FieldDescriptor::new("memo", TextArea, "Memo"),
            FieldDescriptor::new("birthday", Text, "Birthday"),
            FieldDescriptor::new("address", Text, "Address"),
            FieldDescriptor::new("url", Url, "Website"),
            FieldDescriptor::new("nickname", Text, "Nickname"),
        ],

        QrType::Geo => vec![
            FieldDescriptor::new("latitude", Number, "Latitude")
                .step("any")
                .required(),
            FieldDescriptor::new("longitude", Number, "Longitude")
                .step("any")
                .required(),
            FieldDescriptor::new("query", Text, "Place Name"),
        ],

        QrType::Event => vec![
            FieldDescriptor::new("summary", Text, "Event Title").required(),
            FieldDescriptor::new("start_date", DateTime, "Start Date").required(),
            FieldDescriptor::new("end_date", DateTime, "End Date").required(),
            FieldDescriptor::new("location", Text, "Location"),
            FieldDescriptor::new("description", TextArea, "Description"),
        ],

        QrType::Bitcoin => vec![
            FieldDescriptor::new("address", Text, "Bitcoin Address").required(),
            FieldDescriptor::new("amount", Number, "Amount (BTC)").step("any"),
            FieldDescriptor::new("label", Text, "Label"),
            FieldDescriptor::new("message", Text, "Message"),
        ],

        QrType::Whatsapp => vec![
            FieldDescriptor::new("phone_number", Tel, "Phone Number").required(),
            FieldDescriptor::new("message", TextArea, "Message"),
        ],
    }
}

/// The cross-type common-option fields (styling and embedding), in render
/// order. Persisted between sessions, except for file-kind fields.
pub fn common_fields() -> Vec<FieldDescriptor> {
    use FieldKind::*;

    vec![
        FieldDescriptor::new("style", Select, "Module Style")
            .options(&[
                ("SQUARE_MODULE", "Square"),
                ("ROUNDED_MODULE", "Rounded"),
                ("VERTICAL_BARS", "Vertical Bars"),
                ("HORIZONTAL_BARS", "Horizontal Bars"),
            ])
            .required(),
        FieldDescriptor::new("color_mask", Select, "Color Mask")
            .options(&[
                ("SOLID_FILL", "Solid Fill"),
                ("RADIAL_GRADIENT", "Radial Gradient"),
                ("SQUARE_GRADIENT", "Square Gradient"),
                ("HORIZONTAL_GRADIENT", "Horizontal Gradient"),
                ("VERTICAL_GRADIENT", "Vertical Gradient"),
            ])
            .required(),
        FieldDescriptor::new("fill_color", Color, "Fill Color"),
        FieldDescriptor::new("back_color", Color, "Background Color"),
        FieldDescriptor::new("embedded_image", File, "Embedded Image"),
        FieldDescriptor::new("embedded_image_ratio", Range, "Embedded Image Size")
            .range(0.1, 0.5)
            .step("0.05"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_type_has_fields_with_unique_names() {
        for &ty in QR_TYPES {
            let list = fields(ty);
            assert!(!list.is_empty(), "{ty} has no fields");

            let names: HashSet<&str> = list.iter().map(|f| f.name).collect();
            assert_eq!(names.len(), list.len(), "{ty} has duplicate field names");
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        for &ty in QR_TYPES {
            assert_eq!(QrType::parse(ty.as_str()), Some(ty));
            assert_eq!(ty.as_str().parse::<QrType>(), Ok(ty));
        }
        assert_eq!(QrType::parse("hologram"), None);
    }

    #[test]
    fn test_endpoint_mapping() {
        assert_eq!(QrType::Phone.endpoint(), "phonenumber");
        for &ty in QR_TYPES {
            if ty != QrType::Phone {
                assert_eq!(ty.endpoint(), ty.as_str());
            }
        }
    }

    #[test]
    fn test_wifi_encryption_choices() {
        let list = fields(QrType::Wifi);
        let encryption = list.iter().find(|f| f.name == "encryption").unwrap();
        assert_eq!(encryption.kind, FieldKind::Select);
        assert!(encryption.required);
        let values: Vec<&str> = encryption.options.iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["WPA", "WEP", "nopass"]);
    }

    #[test]
    fn test_common_fields_mark_upload_as_file_kind() {
        let list = common_fields();
        let upload = list.iter().find(|f| f.name == "embedded_image").unwrap();
        assert!(upload.kind.is_file());
        assert_eq!(list.iter().filter(|f| f.kind.is_file()).count(), 1);
    }

    #[test]
    fn test_common_ratio_bounds() {
        let list = common_fields();
        let ratio = list.iter().find(|f| f.name == "embedded_image_ratio").unwrap();
        assert_eq!(ratio.min, Some(0.1));
        assert_eq!(ratio.max, Some(0.5));
        assert_eq!(ratio.step, Some("0.05"));
    }
}
