use std::rc::Rc;

use playforge_game::{
    CARD_DRAW_DELAY_MS, Cue, GameDesign, Phase, ROLL_DELAY_MS, Simulation, UniformSource,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use yew::prelude::*;

use crate::audio::AudioEngine;
use crate::components::board_view::BoardView;
use crate::timer::TimerHandle;

/// Properties for the playtest simulator modal
#[derive(Properties, Clone)]
pub struct Props {
    /// Fully resolved design from the content-generation collaborator.
    pub design: Rc<GameDesign>,
    /// Optional decorative board image.
    #[prop_or_default]
    pub image_url: Option<AttrValue>,
    /// Invoked solely on explicit user dismissal.
    pub on_close: Callback<()>,
}

impl PartialEq for Props {
    fn eq(&self, other: &Self) -> bool {
        // The design is immutable for the lifetime of a simulation; callbacks
        // are not compared.
        Rc::ptr_eq(&self.design, &other.design) && self.image_url == other.image_url
    }
}

/// Messages for the simulator component
pub enum Msg {
    Roll,
    ResolveRoll,
    DrawCard,
    Reset,
    Close,
    KeyDown(KeyboardEvent),
}

/// Self-contained playtest modal: owns the simulation, the audio engine,
/// and every pending timer. Timers are cancelled on unmount so a closed
/// simulator never receives a late roll resolution.
pub struct Simulator {
    sim: Simulation,
    rng: UniformSource<SmallRng>,
    audio: AudioEngine,
    roll_timer: Option<TimerHandle>,
    card_timer: Option<TimerHandle>,
}

impl Component for Simulator {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            sim: Simulation::new((*ctx.props().design).clone()),
            rng: UniformSource::new(SmallRng::seed_from_u64(entropy_seed())),
            audio: AudioEngine::new(),
            roll_timer: None,
            card_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Roll => {
                if !self.sim.begin_roll() {
                    return false;
                }
                self.audio.play(Cue::Roll);
                let link = ctx.link().clone();
                self.roll_timer = Some(TimerHandle::schedule(ROLL_DELAY_MS, move || {
                    link.send_message(Msg::ResolveRoll);
                }));
                true
            }
            Msg::ResolveRoll => {
                self.roll_timer = None;
                let Some(outcome) = self.sim.resolve_roll(&mut self.rng) else {
                    return false;
                };
                for cue in &outcome.cues {
                    self.audio.play(*cue);
                }
                if outcome.card_pending {
                    let link = ctx.link().clone();
                    self.card_timer = Some(TimerHandle::schedule(CARD_DRAW_DELAY_MS, move || {
                        link.send_message(Msg::DrawCard);
                    }));
                }
                true
            }
            Msg::DrawCard => {
                self.card_timer = None;
                if self.sim.draw_card(&mut self.rng).is_some() {
                    self.audio.play(Cue::Card);
                    true
                } else {
                    false
                }
            }
            Msg::Reset => {
                self.cancel_pending();
                self.sim.reset();
                true
            }
            Msg::Close => {
                self.cancel_pending();
                self.audio.close();
                ctx.props().on_close.emit(());
                false
            }
            Msg::KeyDown(e) => {
                if e.key() == "Escape" {
                    e.prevent_default();
                    ctx.link().send_message(Msg::Close);
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let design = self.sim.design();
        let on_close = ctx.link().callback(|_: MouseEvent| Msg::Close);
        let on_keydown = ctx.link().callback(Msg::KeyDown);
        let swallow_click = Callback::from(|e: MouseEvent| e.stop_propagation());

        html! {
            <div class="modal-backdrop" role="presentation" onclick={on_close.clone()}>
                <div
                    class="modal simulator"
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby="simulator-title"
                    tabindex="0"
                    onkeydown={on_keydown}
                    onclick={swallow_click}
                >
                    <div class="modal__header">
                        <h2 id="simulator-title">{ format!("Playtest: {}", design.title) }</h2>
                        <button type="button" class="modal__close" aria-label="Close playtest"
                            onclick={on_close}>
                            {"X"}
                        </button>
                    </div>
                    <div class="simulator__body">
                        <BoardView
                            board={self.sim.board().to_vec()}
                            position={self.sim.position()}
                            image_url={ctx.props().image_url.clone()}
                        />
                        <aside class="simulator__panel">
                            { self.view_status(ctx) }
                            { self.view_effect() }
                            { self.view_card() }
                            { self.view_log() }
                        </aside>
                    </div>
                </div>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        // Unmount mid-delay must not leave callbacks aimed at dead state.
        self.cancel_pending();
        self.audio.close();
    }
}

impl Simulator {
    fn cancel_pending(&mut self) {
        if let Some(timer) = self.roll_timer.take() {
            timer.cancel();
        }
        if let Some(timer) = self.card_timer.take() {
            timer.cancel();
        }
    }

    fn view_status(&self, ctx: &Context<Self>) -> Html {
        let phase_text = match self.sim.phase() {
            Phase::Ready => "Ready to roll",
            Phase::Rolling => "Rolling…",
            Phase::Over => "Game over!",
        };
        let rolling = matches!(self.sim.phase(), Phase::Rolling);
        let over = self.sim.is_game_over();
        let on_roll = ctx.link().callback(|_| Msg::Roll);
        let on_reset = ctx.link().callback(|_| Msg::Reset);

        html! {
            <section class="simulator__status" aria-live="polite">
                <p><strong>{"Turn "}{ self.sim.turn() }</strong>{" · "}{ phase_text }</p>
                { if over && !self.sim.design().reward.is_empty() {
                    html! { <p class="simulator__reward">{ &self.sim.design().reward }</p> }
                } else {
                    html! {}
                }}
                <div class="simulator__actions">
                    <button type="button" class="btn btn--roll" disabled={rolling || over}
                        onclick={on_roll}>
                        {"Roll the die"}
                    </button>
                    <button type="button" class="btn btn--reset" onclick={on_reset}>
                        {"Reset"}
                    </button>
                </div>
            </section>
        }
    }

    fn view_effect(&self) -> Html {
        match self.sim.current_effect() {
            Some(effect) => html! {
                <section class="simulator__effect">
                    <h3>{"Tile effect"}</h3>
                    <p>{ effect }</p>
                </section>
            },
            None => html! {},
        }
    }

    fn view_card(&self) -> Html {
        match self.sim.drawn_card() {
            Some(card) => html! {
                <section class="simulator__card">
                    <h3>{ format!("{} card", card.kind) }</h3>
                    <p>{ format!("\u{201c}{}\u{201d}", card.content) }</p>
                </section>
            },
            None => html! {},
        }
    }

    fn view_log(&self) -> Html {
        html! {
            <section class="simulator__log">
                <h3>{"Log"}</h3>
                <ul>
                    { for self.sim.log().iter().map(|line| html! { <li>{ line }</li> }) }
                </ul>
            </section>
        }
    }
}

fn entropy_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        // Millisecond clock is plenty for a toy die; avoids a getrandom
        // dependency on the wasm target.
        js_sys::Date::now().to_bits()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0x00C0_FFEE, |d| d.as_millis() as u64)
    }
}
