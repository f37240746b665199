//! Card documents accepted by Teams incoming webhooks.
//!
//! Only the subset of the MessageCard and Adaptive Card formats this tool
//! fills in is modelled here.

use serde::Serialize;

const MESSAGE_CARD_TYPE: &str = "MessageCard";
const MESSAGE_CARD_CONTEXT: &str = "https://schema.org/extensions";
const OPEN_URI_ACTION_TYPE: &str = "OpenUri";

const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
const ADAPTIVE_CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const ADAPTIVE_CARD_VERSION: &str = "1.2";

/// Maximum number of `potentialAction` entries a MessageCard may carry.
pub const MAX_POTENTIAL_ACTIONS: usize = 4;

/// The document POSTed to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardDocument {
    MessageCard(MessageCard),
    Mention(MentionMessage),
}

impl CardDocument {
    /// Reason the document would be rejected by Teams, if any.
    #[must_use]
    pub fn validation_problem(&self) -> Option<String> {
        match self {
            Self::MessageCard(card) => card.validation_problem(),
            Self::Mention(message) => message.validation_problem(),
        }
    }

    /// Number of content blocks: sections for MessageCards, text blocks for
    /// mention messages.
    #[must_use]
    pub fn section_count(&self) -> usize {
        match self {
            Self::MessageCard(card) => card.sections.len(),
            Self::Mention(message) => message.card().map_or(0, |c| c.body.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: String,
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<MessageCardSection>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub potential_action: Vec<PotentialAction>,
}

impl Default for MessageCard {
    fn default() -> Self {
        Self {
            card_type: MESSAGE_CARD_TYPE.to_string(),
            context: MESSAGE_CARD_CONTEXT.to_string(),
            summary: None,
            title: None,
            text: None,
            theme_color: None,
            sections: Vec::new(),
            potential_action: Vec::new(),
        }
    }
}

impl MessageCard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self, section: MessageCardSection) {
        self.sections.push(section);
    }

    pub fn add_action(&mut self, action: PotentialAction) {
        self.potential_action.push(action);
    }

    fn validation_problem(&self) -> Option<String> {
        let has = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        if !has(&self.summary) && !has(&self.text) {
            return Some("summary or text is required".to_string());
        }
        if self.potential_action.len() > MAX_POTENTIAL_ACTIONS {
            return Some(format!(
                "{} actions present, at most {} allowed",
                self.potential_action.len(),
                MAX_POTENTIAL_ACTIONS
            ));
        }
        None
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCardSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub markdown: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub start_group: bool,
}

impl MessageCardSection {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            title: None,
            text: Some(text.into()),
            markdown: true,
            start_group: false,
        }
    }

    #[must_use]
    pub fn starting_group(mut self) -> Self {
        self.start_group = true;
        self
    }
}

/// An "open URL" button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PotentialAction {
    #[serde(rename = "@type")]
    pub action_type: String,
    pub name: String,
    pub targets: Vec<ActionTarget>,
}

impl PotentialAction {
    #[must_use]
    pub fn open_uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            action_type: OPEN_URI_ACTION_TYPE.to_string(),
            name: name.into(),
            targets: vec![ActionTarget {
                os: "default".to_string(),
                uri: uri.into(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionTarget {
    pub os: String,
    pub uri: String,
}

/// Teams `message` envelope carrying one Adaptive Card. Used for messages
/// that @mention users, which MessageCards cannot do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MentionMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub attachments: Vec<CardAttachment>,
}

impl MentionMessage {
    #[must_use]
    pub fn new(card: AdaptiveCard) -> Self {
        Self {
            kind: "message".to_string(),
            attachments: vec![CardAttachment {
                content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
                content_url: None,
                content: card,
            }],
        }
    }

    /// The attached card. Every constructed message has exactly one.
    #[must_use]
    pub fn card(&self) -> Option<&AdaptiveCard> {
        self.attachments.first().map(|a| &a.content)
    }

    fn validation_problem(&self) -> Option<String> {
        match self.card() {
            None => Some("message has no card attachment".to_string()),
            Some(card) if card.body.is_empty() => Some("card body is empty".to_string()),
            Some(card) if card.msteams.entities.is_empty() => {
                Some("mention message has no mentions".to_string())
            }
            Some(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAttachment {
    pub content_type: String,
    pub content_url: Option<String>,
    pub content: AdaptiveCard,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdaptiveCard {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub body: Vec<TextBlock>,
    pub msteams: MsTeamsExtension,
}

impl Default for AdaptiveCard {
    fn default() -> Self {
        Self {
            schema: ADAPTIVE_CARD_SCHEMA.to_string(),
            kind: "AdaptiveCard".to_string(),
            version: ADAPTIVE_CARD_VERSION.to_string(),
            body: Vec::new(),
            msteams: MsTeamsExtension::default(),
        }
    }
}

impl AdaptiveCard {
    pub fn add_text_block(&mut self, block: TextBlock) {
        self.body.push(block);
    }

    pub fn add_mention(&mut self, mention: Mention) {
        self.msteams.entities.push(mention);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub wrap: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub separator: bool,
}

impl TextBlock {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "TextBlock".to_string(),
            text: text.into(),
            wrap: true,
            separator: false,
        }
    }

    #[must_use]
    pub fn separated(mut self) -> Self {
        self.separator = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MsTeamsExtension {
    pub width: String,
    pub entities: Vec<Mention>,
}

impl Default for MsTeamsExtension {
    fn default() -> Self {
        Self {
            width: "Full".to_string(),
            entities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mention {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub mentioned: Mentioned,
}

impl Mention {
    #[must_use]
    pub fn new(name: &str, id: &str) -> Self {
        Self {
            kind: "mention".to_string(),
            text: mention_tag(name),
            mentioned: Mentioned {
                id: id.to_string(),
                name: name.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mentioned {
    pub id: String,
    pub name: String,
}

/// Inline markup Teams replaces with the mentioned user.
#[must_use]
pub fn mention_tag(name: &str) -> String {
    format!("<at>{name}</at>")
}
