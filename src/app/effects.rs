use crate::app::{App, Message, Model, ToastLevel};
use crate::i18n::{Lang, save_preference};

impl App {
    /// Work that touches the outside world after `update` has run.
    ///
    /// `lang_before` is the route language before the message was applied.
    pub(super) fn handle_message_side_effects(
        &self,
        model: &mut Model,
        msg: &Message,
        lang_before: Lang,
    ) {
        match msg {
            Message::SwitchLanguage(_) | Message::LanguagePickerSelect
                if model.route.lang != lang_before =>
            {
                Self::persist_language(model);
            }
            _ => {}
        }
    }

    fn persist_language(model: &mut Model) {
        let Some(path) = model.preference_path.clone() else {
            return;
        };
        let lang = model.route.lang;
        match save_preference(&path, lang) {
            Ok(()) => {
                crate::perf::log_event(
                    "lang.saved",
                    format!("lang={} path={}", lang.code(), path.display()),
                );
            }
            Err(err) => {
                tracing::warn!(%err, "could not save language preference");
                crate::perf::log_event("lang.save.error", err.to_string());
                let label = model.strings().t("toast.preferenceNotSaved");
                model.show_toast(ToastLevel::Warning, format!("{label}: {err}"));
            }
        }
    }
}
