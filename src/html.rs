use maud::{DOCTYPE, Markup, html};

pub const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

pub const CARD_TITLE_STYLE: &str = "text-lg font-semibold text-gray-900 dark:text-white";

pub const MUTED_TEXT_STYLE: &str = "text-sm text-gray-600 dark:text-gray-400";

pub const TOGGLE_ACTIVE_STYLE: &str = "px-3 py-1 text-sm font-medium rounded \
    bg-blue-600 text-white";

pub const TOGGLE_INACTIVE_STYLE: &str = "px-3 py-1 text-sm font-medium rounded \
    text-gray-600 hover:bg-gray-100 dark:text-gray-300 dark:hover:bg-gray-700";

pub const PAGE_CONTAINER_STYLE: &str = "flex flex-col gap-8 px-2 lg:px-6 py-8 mx-auto \
    max-w-screen-xl text-gray-900 dark:text-white";

/// The ECharts build loaded by pages with charts.
pub const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

/// Extra elements for a page's `<head>`.
pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="fr"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - FlowTrack" }
                link href="/static/main.css" rel="stylesheet";

                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                script src="https://unpkg.com/htmx.org@2.0.8" {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Retour à l'accueil"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// A card with a title, optional controls on the right and a body.
pub fn card(id: &str, title: &str, controls: Option<Markup>, body: Markup) -> Markup {
    html! {
        section id=(id) class=(CARD_STYLE)
        {
            div class="flex flex-wrap items-center justify-between gap-2 mb-4"
            {
                h2 class=(CARD_TITLE_STYLE) { (title) }

                @if let Some(controls) = controls {
                    (controls)
                }
            }

            (body)
        }
    }
}

/// A centred message shown in place of data that does not exist yet.
pub fn empty_state(icon: &str, title: &str, description: &str) -> Markup {
    html! {
        div class="empty-state flex flex-col items-center justify-center py-12 text-center"
        {
            span class="text-4xl mb-2" aria-hidden="true" { (icon) }
            p class="font-medium text-gray-900 dark:text-white" { (title) }
            p class=(MUTED_TEXT_STYLE) { (description) }
        }
    }
}
