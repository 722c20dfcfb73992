use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::core::platform;
use ui::views::JournalPage;
use ui::MAIN_CSS;

fn main() {
    dioxus::logger::init(Level::INFO).expect("failed to init logger");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(platform::load_config);

    rsx! {
        // Global app resources
        document::Title { "Student Progress Sheets" }
        document::Style { "{MAIN_CSS}" }

        JournalPage {}
    }
}
