// SPDX-License-Identifier: MPL-2.0
//! Toast markup and stylesheet assembly.
//!
//! Thin string templating over the entity: a single render function branches
//! on the toast kind, and the one-shot stylesheet carries the first message's
//! animation settings into the `.active`/`.flash`/`.hiding` rules. No layout
//! logic lives here.

use crate::host::NotificationConfig;
use crate::markup::parse_message;
use crate::ui::notifications::{Kind, Notification};

/// Renders the full toast element for attachment.
#[must_use]
pub fn render(notification: &Notification, image_dir: &str) -> String {
    let mut classes = String::from("bulletin-notification");
    if !notification.theme().is_empty() {
        classes.push(' ');
        classes.push_str(notification.theme());
    }
    if notification.flash() {
        classes.push_str(" flash");
    }
    if notification.progress_enabled() {
        classes.push_str(" with-progress");
    }

    let body = match notification.kind() {
        Kind::Standard => parse_message(notification.message()),
        Kind::Advanced => {
            let advanced = notification.advanced();
            let (title, subject, icon) = advanced
                .map(|a| (a.title.as_str(), a.subject.as_str(), a.icon.as_str()))
                .unwrap_or_default();
            format!(
                concat!(
                    "<div class=\"notification-header\">",
                    "<div class=\"notification-icon\">{icon}</div>",
                    "<div class=\"notification-title\">{title}</div>",
                    "<div class=\"notification-subject\">{subject}</div>",
                    "</div>",
                    "<div class=\"notification-message\">{message}</div>"
                ),
                icon = icon_markup(icon, image_dir),
                title = parse_message(title),
                subject = parse_message(subject),
                message = parse_message(notification.message()),
            )
        }
    };

    let progress = if notification.progress_enabled() {
        "<div class=\"notification-progress\"><div class=\"notification-bar\"></div></div>"
    } else {
        ""
    };

    format!("<div class=\"{classes}\">{body}{progress}</div>")
}

/// Markup for the advanced header icon.
#[must_use]
pub fn icon_markup(icon: &str, image_dir: &str) -> String {
    format!("<img src=\"{image_dir}/{icon}\" />")
}

/// Builds the stylesheet installed once, from the first message's config.
#[must_use]
pub fn stylesheet(config: &NotificationConfig) -> String {
    format!(
        concat!(
            ".animate__animated {{\n",
            "    -webkit-animation-duration: {time}ms;\n",
            "    animation-duration: {time}ms;\n",
            "}}\n\n",
            ".bulletin-notification.active {{\n",
            "    opacity: 0;\n",
            "    animation: fadeIn {time}ms ease 0ms forwards;\n",
            "}}\n\n",
            ".bulletin-notification.active.flash {{\n",
            "    opacity: 1;\n",
            "    animation: {flash} 400ms linear infinite;\n",
            "    animation-iteration-count: {flash_count};\n",
            "}}\n\n",
            ".bulletin-notification.hiding {{\n",
            "    opacity: 1;\n",
            "    animation: {out} {time}ms ease 0ms forwards;\n",
            "}}\n"
        ),
        time = config.animation_time,
        flash = config.flash_type,
        flash_count = config.flash_count,
        out = config.animation_out,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::host::ToastRequest;
    use crate::ui::notifications::Notification;

    fn entity(kind: Kind, json: &str) -> Notification {
        let request: ToastRequest = serde_json::from_str(json).expect("valid request");
        Notification::from_request(kind, request, &Settings::default())
    }

    #[test]
    fn standard_render_is_bare_message_markup() {
        let n = entity(Kind::Standard, r#"{"id": "a", "message": "~h~hi~"}"#);
        let html = render(&n, "images");
        assert!(html.starts_with("<div class=\"bulletin-notification default\">"));
        assert!(html.contains("<span class='h'>hi</span>"));
        assert!(!html.contains("notification-header"));
    }

    #[test]
    fn advanced_render_includes_header_parts() {
        let n = entity(
            Kind::Advanced,
            r#"{"id": "a", "message": "m", "title": "T", "subject": "S", "icon": "i.png"}"#,
        );
        let html = render(&n, "images");
        assert!(html.contains("notification-header"));
        assert!(html.contains("<img src=\"images/i.png\" />"));
        assert!(html.contains("<div class=\"notification-title\">T</div>"));
        assert!(html.contains("<div class=\"notification-subject\">S</div>"));
        assert!(html.contains("<div class=\"notification-message\">m</div>"));
    }

    #[test]
    fn flash_and_progress_add_root_classes() {
        let n = entity(
            Kind::Standard,
            r#"{"id": "a", "message": "m", "flash": true, "progress": true}"#,
        );
        let html = render(&n, "images");
        assert!(html.contains("flash"));
        assert!(html.contains("with-progress"));
        assert!(html.contains("notification-bar"));
    }

    #[test]
    fn stylesheet_reflects_animation_settings() {
        let config = NotificationConfig {
            animation_time: 250,
            animation_out: "bounceOut".to_string(),
            flash_type: "flash".to_string(),
            flash_count: 3,
            ..NotificationConfig::default()
        };
        let css = stylesheet(&config);
        assert!(css.contains("animation: fadeIn 250ms ease 0ms forwards;"));
        assert!(css.contains("animation: bounceOut 250ms ease 0ms forwards;"));
        assert!(css.contains("animation-iteration-count: 3;"));
    }
}
