use chrono::{TimeZone, Utc};
use send2teams::core::config::{Config, DEFAULT_THEME_COLOR};
use send2teams::core::models::{AppInfo, MessagePayload, TargetLink, UserMention};
use send2teams::teams::card::CardDocument;
use send2teams::teams::card_builder::{build_card, build_card_at};

/// Tests for building the card document sent to Teams

fn payload(title: &str, message: &str) -> MessagePayload {
    MessagePayload {
        title: title.to_string(),
        body_text: message.to_string(),
        theme_color: DEFAULT_THEME_COLOR.to_string(),
        sender: None,
        target_links: Vec::new(),
        mentions: Vec::new(),
        code_blocks: Vec::new(),
        convert_eol: false,
    }
}

fn message_card(doc: CardDocument) -> send2teams::teams::card::MessageCard {
    match doc {
        CardDocument::MessageCard(card) => card,
        CardDocument::Mention(_) => panic!("expected a MessageCard"),
    }
}

#[test]
fn test_end_to_end_title_body_and_trailer() {
    let config = Config {
        team: "Ops".to_string(),
        channel: "Alerts".to_string(),
        webhook_url: "https://outlook.office.com/webhook/a1269812-6d10-44b1-abc5-b84f93580ba0@9e7b80c7-d1eb-4b52-8582-76f921e416d9/IncomingWebhook/3fdd6767bae44ac58e5995547d66a4e4/f332c8d9-3397-4ac5-957b-b8e3fc465a8c".to_string(),
        message_title: "Test".to_string(),
        message_text: "Hello".to_string(),
        ..Config::default()
    };
    config.validate().unwrap();

    let app = AppInfo::current();
    let card = message_card(build_card(&config.payload(), &app));

    assert_eq!(card.title.as_deref(), Some("Test"));
    assert_eq!(card.theme_color.as_deref(), Some(DEFAULT_THEME_COLOR));

    let primary = card.sections.first().and_then(|s| s.text.as_deref()).unwrap();
    assert!(primary.contains("Hello"));

    let trailer = card.sections.last().and_then(|s| s.text.as_deref()).unwrap();
    assert!(trailer.contains(&app.name), "{trailer}");
    assert!(trailer.contains(&app.version), "{trailer}");
    assert!(card.sections.last().unwrap().start_group);
}

#[test]
fn test_serialized_card_is_a_message_card() {
    let doc = build_card(&payload("Deploy", "done"), &AppInfo::current());
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["@type"], "MessageCard");
    assert_eq!(value["summary"], "Deploy");
    assert_eq!(value["title"], "Deploy");
    assert_eq!(value["themeColor"], DEFAULT_THEME_COLOR);
    assert_eq!(value["sections"][0]["text"], "done");
    assert!(value.get("potentialAction").is_none());
}

#[test]
fn test_team_and_channel_are_not_sent() {
    let config = Config {
        team: "SecretTeamLabel".to_string(),
        channel: "SecretChannelLabel".to_string(),
        message_title: "t".to_string(),
        message_text: "m".to_string(),
        ..Config::default()
    };
    let doc = build_card(&config.payload(), &AppInfo::current());
    let json = serde_json::to_string(&doc).unwrap();

    assert!(!json.contains("SecretTeamLabel"));
    assert!(!json.contains("SecretChannelLabel"));
}

#[test]
fn test_eol_conversion_only_when_requested() {
    let mut p = payload("t", "one\r\ntwo\\nthree");
    let card = message_card(build_card(&p, &AppInfo::current()));
    assert_eq!(card.sections[0].text.as_deref(), Some("one\r\ntwo\\nthree"));

    p.convert_eol = true;
    let card = message_card(build_card(&p, &AppInfo::current()));
    assert_eq!(card.sections[0].text.as_deref(), Some("one<br>two<br>three"));
}

#[test]
fn test_target_links_become_open_uri_actions() {
    let mut p = payload("Build failed", "see logs");
    p.target_links = vec![
        TargetLink {
            url: "https://ci.example.com/run/42".to_string(),
            label: "Run 42".to_string(),
        },
        TargetLink {
            url: "https://ci.example.com/run/42/log".to_string(),
            label: "Log".to_string(),
        },
    ];

    let card = message_card(build_card(&p, &AppInfo::current()));

    let names: Vec<_> = card.potential_action.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["Run 42", "Log"]);
    assert_eq!(card.potential_action[0].action_type, "OpenUri");
    assert_eq!(card.potential_action[1].targets[0].uri, "https://ci.example.com/run/42/log");
}

#[test]
fn test_code_blocks_get_their_own_sections() {
    let mut p = payload("Alert", "details below");
    p.code_blocks = vec![r#"{"result":{"count":"8"}}"#.to_string(), "plain".to_string()];

    let card = message_card(build_card(&p, &AppInfo::current()));

    // body, two code blocks, trailer
    assert_eq!(card.sections.len(), 4);
    let json_block = card.sections[1].text.as_deref().unwrap();
    assert!(json_block.starts_with("\n```\n{\n\t\"result\""), "{json_block}");
    assert_eq!(card.sections[2].text.as_deref(), Some("\n```\nplain```\n"));
    assert!(card.sections[1].start_group);
}

#[test]
fn test_sender_is_credited_in_trailer() {
    let mut p = payload("t", "m");
    p.sender = Some("Nagios".to_string());
    let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

    let card = message_card(build_card_at(&p, &AppInfo::current(), now));
    let trailer = card.sections.last().and_then(|s| s.text.as_deref()).unwrap();

    assert!(trailer.contains("at 2024-01-02T03:04:05Z"), "{trailer}");
    assert!(trailer.ends_with("on behalf of Nagios"), "{trailer}");
}

#[test]
fn test_mentions_build_adaptive_card_without_title() {
    let mut p = payload("", "please check the backup job");
    p.mentions = vec![
        UserMention {
            display_name: "Jane Doe".to_string(),
            id: "jane@example.com".to_string(),
        },
        UserMention {
            display_name: "John".to_string(),
            id: "29:1abc".to_string(),
        },
    ];

    let doc = build_card(&p, &AppInfo::current());
    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["type"], "message");
    assert!(value.get("title").is_none());
    assert!(value.get("themeColor").is_none());

    let content = &value["attachments"][0]["content"];
    assert_eq!(
        content["body"][0]["text"],
        "<at>Jane Doe</at> <at>John</at> please check the backup job"
    );
    assert!(
        content["body"][1]["text"]
            .as_str()
            .unwrap()
            .contains("send2teams")
    );
    assert_eq!(content["msteams"]["entities"][1]["mentioned"]["id"], "29:1abc");
    assert_eq!(doc.section_count(), 2);
}
