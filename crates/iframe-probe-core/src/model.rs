#![forbid(unsafe_code)]

//! The diagnostic page's state record and its render function.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::context::BrowsingContext;
use crate::counters::{ClickCounters, CounterId};
use crate::embedding::{EmbeddingContext, EmbeddingStatus};
use crate::environment::{EnvironmentSnapshot, display_or_unavailable};
use crate::event::PageEvent;
use crate::hover::{HoverSignal, HoverState, HoverTracker};
use crate::program::{Cmd, Model};
use crate::view::{Item, Section, View};

pub const SECTION_WINDOW: &str = "Current Window Details";
pub const SECTION_PARENT: &str = "Parent Context";
pub const SECTION_INTERACTION: &str = "Interaction";
pub const EMBEDDED_LABEL: &str = "Embedded in an iframe";
pub const HOVER_LABEL: &str = "Mouse over page";
pub const CROSS_ORIGIN_NOTE: &str = "Note: Access to parent window properties might be restricted by browser security policies (cross-origin).";
pub const RELOAD_HINT: &str = "Reload the page to see updated values if window size changes.";

/// Messages accepted by [`ProbeModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMsg {
    Hover(HoverSignal),
    Click(CounterId),
}

impl From<PageEvent> for ProbeMsg {
    fn from(event: PageEvent) -> Self {
        match event {
            PageEvent::PointerEnter => Self::Hover(HoverSignal::PointerEnter),
            PageEvent::PointerLeave => Self::Hover(HoverSignal::PointerLeave),
            PageEvent::Activate(id) => Self::Click(id),
        }
    }
}

/// Everything the page knows, owned by the single page instance.
///
/// The load-time facts (`status`, `environment`, `context`) are fixed at
/// construction. Only the hover tracker and counters change afterwards, and
/// only through [`Model::update`].
#[derive(Debug, Clone)]
pub struct ProbeModel {
    config: ProbeConfig,
    status: EmbeddingStatus,
    environment: EnvironmentSnapshot,
    context: EmbeddingContext,
    hover: HoverTracker,
    counters: ClickCounters,
}

impl ProbeModel {
    /// Run the load sequence: detect embedding, snapshot the environment,
    /// then probe the embedder.
    #[must_use]
    pub fn load(ctx: &impl BrowsingContext, config: ProbeConfig) -> Self {
        let status = EmbeddingStatus::detect(ctx);
        let environment = EnvironmentSnapshot::collect(ctx);
        let context = EmbeddingContext::probe(ctx, status);
        info!(
            embedded = status.is_embedded(),
            origin = environment.origin.as_deref().unwrap_or(""),
            referrer = %context.referrer,
            "environment snapshot taken"
        );
        Self {
            config,
            status,
            environment,
            context,
            hover: HoverTracker::default(),
            counters: ClickCounters::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    #[must_use]
    pub fn status(&self) -> EmbeddingStatus {
        self.status
    }

    #[must_use]
    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.environment
    }

    #[must_use]
    pub fn context(&self) -> &EmbeddingContext {
        &self.context
    }

    #[must_use]
    pub fn hover_state(&self) -> HoverState {
        self.hover.state()
    }

    #[must_use]
    pub fn counters(&self) -> &ClickCounters {
        &self.counters
    }

    /// Serializable view of the current state.
    #[must_use]
    pub fn report(&self) -> ProbeReport<'_> {
        ProbeReport {
            embedded: self.status,
            environment: &self.environment,
            parent_context: &self.context,
            hovering: self.hover.is_over(),
            counters: self.counters,
        }
    }

    /// [`report`](Self::report) as pretty-printed JSON.
    pub fn report_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.report())
    }
}

/// JSON export of a [`ProbeModel`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeReport<'a> {
    pub embedded: EmbeddingStatus,
    pub environment: &'a EnvironmentSnapshot,
    pub parent_context: &'a EmbeddingContext,
    pub hovering: bool,
    pub counters: ClickCounters,
}

impl Model for ProbeModel {
    type Message = ProbeMsg;

    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::log(format!(
            "probe ready: embedded={} parentOrigin={}",
            self.status.is_embedded(),
            self.context.parent_origin().unwrap_or("-")
        ))
    }

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        match msg {
            ProbeMsg::Hover(signal) => {
                let transition = self.hover.handle(signal);
                debug!(
                    signal = signal.as_str(),
                    from = transition.from_state.as_str(),
                    to = transition.to_state.as_str(),
                    "hover transition"
                );
            }
            ProbeMsg::Click(id) => {
                let count = self.counters.increment(id);
                debug!(button = id.number(), count, "button activated");
            }
        }
        Cmd::none()
    }

    fn view(&self) -> View {
        render(self)
    }
}

/// Render the model. Pure: the same state always yields the same view.
#[must_use]
pub fn render(model: &ProbeModel) -> View {
    let mut window_items = Vec::with_capacity(EnvironmentSnapshot::FIELD_COUNT + 1);
    window_items.push(Item::indicator(EMBEDDED_LABEL, model.status.is_embedded()));
    window_items.extend(
        model
            .environment
            .fields()
            .iter()
            .map(|(label, value)| Item::field(*label, display_or_unavailable(value.as_ref()))),
    );

    let mut parent_items: Vec<Item> = model
        .context
        .fields()
        .into_iter()
        .map(|(label, value)| Item::field(label, value))
        .collect();
    if model.status.is_embedded() {
        parent_items.push(Item::Note(CROSS_ORIGIN_NOTE.to_owned()));
    }

    let mut interaction_items = vec![Item::indicator(HOVER_LABEL, model.hover.is_over())];
    interaction_items.extend(CounterId::ALL.into_iter().map(|counter| Item::Button {
        counter,
        count: model.counters.get(counter),
    }));

    let mut footer = Vec::with_capacity(model.config.footer.len() + 1);
    footer.push(RELOAD_HINT.to_owned());
    footer.extend(model.config.footer.iter().cloned());

    View {
        title: model.config.title.clone(),
        sections: vec![
            Section {
                heading: SECTION_WINDOW.to_owned(),
                items: window_items,
            },
            Section {
                heading: SECTION_PARENT.to_owned(),
                items: parent_items,
            },
            Section {
                heading: SECTION_INTERACTION.to_owned(),
                items: interaction_items,
            },
        ],
        footer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::CROSS_ORIGIN_SENTINEL;
    use crate::environment::UNAVAILABLE;
    use crate::program::StepRunner;
    use crate::testing::FakeBrowsingContext;
    use pretty_assertions::assert_eq;

    fn has_line(view: &View, line: &str) -> bool {
        view.lines().iter().any(|l| l == line)
    }

    fn has_prefix(view: &View, prefix: &str) -> bool {
        view.lines().iter().any(|l| l.starts_with(prefix))
    }

    #[test]
    fn fresh_top_level_load() {
        let ctx = FakeBrowsingContext::top_level();
        let model = ProbeModel::load(&ctx, ProbeConfig::default());
        let view = model.view();

        assert_eq!(view.title, "Iframe Behavior Tester");
        assert!(has_line(&view, "Embedded in an iframe: No"));
        assert!(has_line(&view, "referrer: "));
        assert!(!has_prefix(&view, "parentOrigin"));
        assert!(!has_prefix(&view, "parentLocationHref"));
        assert!(!has_line(&view, CROSS_ORIGIN_NOTE));
        assert!(has_line(&view, "Mouse over page: No"));
        assert!(has_line(&view, "Test Button 1: (0)"));
        assert!(has_line(&view, "Test Button 2: (0)"));
        assert!(has_line(&view, "Test Button 3: (0)"));
        assert_eq!(view.footer, vec![RELOAD_HINT.to_owned()]);
    }

    #[test]
    fn fresh_cross_origin_load() {
        let ctx = FakeBrowsingContext::nested_cross_origin("https://www.notion.so/workspace");
        let model = ProbeModel::load(&ctx, ProbeConfig::default());
        let view = model.view();

        assert!(has_line(&view, "Embedded in an iframe: Yes"));
        assert!(has_line(&view, "referrer: https://www.notion.so/workspace"));
        assert!(has_line(
            &view,
            &format!("parentOrigin: {CROSS_ORIGIN_SENTINEL}")
        ));
        assert!(has_line(
            &view,
            &format!("parentLocationHref: {CROSS_ORIGIN_SENTINEL}")
        ));
        assert!(has_line(&view, CROSS_ORIGIN_NOTE));
    }

    #[test]
    fn same_origin_load_shows_real_parent() {
        let ctx = FakeBrowsingContext::nested_same_origin(
            "https://probe.test",
            "https://probe.test/embed.html?x=1",
        );
        let model = ProbeModel::load(&ctx, ProbeConfig::default());
        assert_eq!(model.context().parent_origin(), Some("https://probe.test"));
        let view = model.view();
        assert!(has_line(&view, "parentOrigin: https://probe.test"));
        assert!(has_line(
            &view,
            "parentLocationHref: https://probe.test/embed.html?x=1"
        ));
    }

    #[test]
    fn every_environment_field_is_listed() {
        let ctx = FakeBrowsingContext::top_level();
        let view = ProbeModel::load(&ctx, ProbeConfig::default()).view();
        let window = view.section(SECTION_WINDOW).expect("window section");
        assert_eq!(window.items.len(), EnvironmentSnapshot::FIELD_COUNT + 1);
        assert!(has_line(&view, "languages: en-US, en"));
        assert!(has_line(&view, "devicePixelRatio: 2"));
        assert!(has_line(&view, "cookieEnabled: true"));
    }

    #[test]
    fn unavailable_fields_stay_visible() {
        let ctx = FakeBrowsingContext::top_level().with_environment(EnvironmentSnapshot::default());
        let view = ProbeModel::load(&ctx, ProbeConfig::default()).view();
        assert!(has_line(&view, &format!("platform: {UNAVAILABLE}")));
        assert!(has_line(&view, &format!("innerWidth: {UNAVAILABLE}")));
    }

    #[test]
    fn clicks_do_not_cross_talk() {
        let ctx = FakeBrowsingContext::top_level();
        let mut runner = StepRunner::new(ProbeModel::load(&ctx, ProbeConfig::default()));
        runner.init();
        for _ in 0..3 {
            runner.push_event(PageEvent::Activate(CounterId::Two));
        }
        runner.step();
        let view = runner.render().expect("dirty").view;
        assert!(has_line(&view, "Test Button 1: (0)"));
        assert!(has_line(&view, "Test Button 2: (3)"));
        assert!(has_line(&view, "Test Button 3: (0)"));
    }

    #[test]
    fn hover_toggles_indicator() {
        let ctx = FakeBrowsingContext::top_level();
        let mut model = ProbeModel::load(&ctx, ProbeConfig::default());
        model.update(ProbeMsg::from(PageEvent::PointerEnter));
        assert_eq!(model.hover_state(), HoverState::Over);
        assert!(has_line(&model.view(), "Mouse over page: Yes"));
        model.update(ProbeMsg::from(PageEvent::PointerLeave));
        assert!(has_line(&model.view(), "Mouse over page: No"));
    }

    #[test]
    fn render_is_repeatable() {
        let ctx = FakeBrowsingContext::nested_cross_origin("https://host.test/");
        let model = ProbeModel::load(&ctx, ProbeConfig::default());
        assert_eq!(model.view(), model.view());
        assert_eq!(render(&model).to_text(), model.view().to_text());
    }

    #[test]
    fn configured_title_and_footer() {
        let config = ProbeConfig {
            title: "Embed check".into(),
            footer: vec!["Deployed on Vercel, for testing in Notion.".into()],
            ..ProbeConfig::default()
        };
        let view = ProbeModel::load(&FakeBrowsingContext::top_level(), config).view();
        assert_eq!(view.title, "Embed check");
        assert_eq!(
            view.footer,
            vec![
                RELOAD_HINT.to_owned(),
                "Deployed on Vercel, for testing in Notion.".to_owned()
            ]
        );
    }

    #[test]
    fn init_logs_probe_summary() {
        let ctx = FakeBrowsingContext::nested_cross_origin("");
        let mut runner = StepRunner::new(ProbeModel::load(&ctx, ProbeConfig::default()));
        runner.init();
        assert_eq!(
            runner.drain_logs(),
            vec![format!(
                "probe ready: embedded=true parentOrigin={CROSS_ORIGIN_SENTINEL}"
            )]
        );
    }

    #[test]
    fn report_json_shape() {
        let ctx = FakeBrowsingContext::nested_cross_origin("https://host.test/");
        let mut model = ProbeModel::load(&ctx, ProbeConfig::default());
        model.update(ProbeMsg::Click(CounterId::One));
        model.update(ProbeMsg::Hover(HoverSignal::PointerEnter));

        let json: serde_json::Value =
            serde_json::from_str(&model.report_json().unwrap()).unwrap();
        assert_eq!(json["embedded"], true);
        assert_eq!(json["hovering"], true);
        assert_eq!(json["counters"], serde_json::json!([1, 0, 0]));
        assert_eq!(json["parentContext"]["referrer"], "https://host.test/");
        assert_eq!(json["parentContext"]["parentOrigin"], CROSS_ORIGIN_SENTINEL);
        assert_eq!(json["environment"]["screenWidth"], 1920);
    }
}
