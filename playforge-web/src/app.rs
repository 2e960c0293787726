use std::rc::Rc;

use playforge_game::GameDesign;
use yew::prelude::*;

use crate::components::simulator::Simulator;

const SAMPLE_DESIGN_JSON: &str = include_str!("../static/assets/data/sample_design.json");

/// Application shell: shows the generated design summary and hosts the
/// playtest simulator modal. The design arrives fully resolved; the shell
/// does not validate it.
#[function_component(App)]
pub fn app() -> Html {
    let design = use_memo((), |_| GameDesign::from_json(SAMPLE_DESIGN_JSON).map(Rc::new));
    let simulating = use_state(|| false);

    let design = match design.as_ref() {
        Ok(design) => Rc::clone(design),
        Err(e) => {
            log::error!("Failed to parse embedded design: {e}");
            return html! {
                <main role="main" class="error">
                    <h1>{ "Design unavailable" }</h1>
                    <p>{ e.to_string() }</p>
                </main>
            };
        }
    };

    let open_sim = {
        let simulating = simulating.clone();
        Callback::from(move |_| simulating.set(true))
    };
    let close_sim = {
        let simulating = simulating.clone();
        Callback::from(move |()| simulating.set(false))
    };

    html! {
        <main role="main" class="app">
            <header class="app__header">
                <h1>{ &design.title }</h1>
                <p class="app__tagline">{ &design.tagline }</p>
            </header>

            <section class="design-summary">
                <p>{ &design.description }</p>
                <h2>{ "How to play" }</h2>
                <p>{ &design.how_to_play }</p>

                <h2>{ "Tiles" }</h2>
                <ul class="design-summary__tiles">
                    { for design.tile_types.iter().map(|tile| html! {
                        <li>
                            <span class="tile-swatch"
                                style={format!("background-color:{};", tile.color)} />
                            <strong>{ &tile.name }</strong>{ ": " }{ &tile.effect }
                        </li>
                    }) }
                </ul>

                <h2>{ "Cards" }</h2>
                <ul class="design-summary__cards">
                    { for design.card_types.iter().map(|card| html! {
                        <li><strong>{ &card.kind }</strong>{ ": " }{ &card.description }</li>
                    }) }
                </ul>

                <h2>{ "Learning outcomes" }</h2>
                <ul class="design-summary__outcomes">
                    { for design.learning_outcomes.iter().map(|outcome| html! {
                        <li>{ outcome }</li>
                    }) }
                </ul>

                <p class="design-summary__win">
                    <strong>{ "Win condition: " }</strong>{ &design.win_condition }
                </p>
            </section>

            <button type="button" class="btn btn--playtest" id="open-playtest"
                onclick={open_sim}>
                { "Open playtest" }
            </button>

            { if *simulating {
                html! { <Simulator design={design} on_close={close_sim} /> }
            } else {
                html! {}
            }}
        </main>
    }
}
