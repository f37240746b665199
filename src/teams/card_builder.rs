//! Turns a validated [`MessagePayload`] into the card document sent to Teams.

use chrono::{DateTime, Utc};

use crate::core::models::{AppInfo, MessagePayload};
use crate::teams::card::{
    AdaptiveCard, CardDocument, Mention, MentionMessage, MessageCard, MessageCardSection,
    PotentialAction, TextBlock, mention_tag,
};
use crate::teams::format::{convert_eol_to_break, try_format_as_code_block};

/// Build the card for `payload`, stamping the trailer with the current time.
#[must_use]
pub fn build_card(payload: &MessagePayload, app: &AppInfo) -> CardDocument {
    build_card_at(payload, app, Utc::now())
}

/// Build the card for `payload` with an explicit trailer timestamp.
#[must_use]
pub fn build_card_at(payload: &MessagePayload, app: &AppInfo, now: DateTime<Utc>) -> CardDocument {
    let body = if payload.convert_eol {
        convert_eol_to_break(&payload.body_text)
    } else {
        payload.body_text.clone()
    };
    let trailer = message_trailer(app, payload.sender.as_deref(), now);

    if payload.is_mention_mode() {
        CardDocument::Mention(build_mention_message(payload, &body, trailer))
    } else {
        CardDocument::MessageCard(build_message_card(payload, body, trailer))
    }
}

fn build_message_card(payload: &MessagePayload, body: String, trailer: String) -> MessageCard {
    let mut card = MessageCard::new();
    card.summary = Some(payload.title.clone());
    card.title = Some(payload.title.clone());
    card.theme_color = Some(payload.theme_color.clone());

    card.add_section(MessageCardSection::new(body));

    for code in &payload.code_blocks {
        card.add_section(MessageCardSection::new(try_format_as_code_block(code)).starting_group());
    }

    card.add_section(MessageCardSection::new(trailer).starting_group());

    for link in &payload.target_links {
        card.add_action(PotentialAction::open_uri(&link.label, &link.url));
    }

    card
}

fn build_mention_message(payload: &MessagePayload, body: &str, trailer: String) -> MentionMessage {
    let mut card = AdaptiveCard::default();

    let tags: Vec<String> = payload
        .mentions
        .iter()
        .map(|m| mention_tag(&m.display_name))
        .collect();
    card.add_text_block(TextBlock::new(format!("{} {}", tags.join(" "), body)));
    card.add_text_block(TextBlock::new(trailer).separated());

    for mention in &payload.mentions {
        card.add_mention(Mention::new(&mention.display_name, &mention.id));
    }

    MentionMessage::new(card)
}

/// Branded footer crediting this tool, and the sender when one was given.
#[must_use]
pub fn message_trailer(app: &AppInfo, sender: Option<&str>, now: DateTime<Utc>) -> String {
    let mut trailer = format!(
        "Message generated by [{}]({}) ({}) at {}",
        app.name,
        app.url,
        app.version,
        now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    );
    if let Some(sender) = sender.filter(|s| !s.is_empty()) {
        trailer.push_str(&format!(" on behalf of {sender}"));
    }
    trailer
}
