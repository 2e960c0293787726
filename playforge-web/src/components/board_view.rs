use playforge_game::{BoardSpace, SpaceKind};
use yew::prelude::*;

/// Properties for the board path renderer
#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    /// The cached path layout, coordinates in percent of the board area.
    pub board: Vec<BoardSpace>,
    /// Index of the space the player token currently occupies.
    pub position: usize,
    /// Optional decorative background; a neutral placeholder renders when absent.
    #[prop_or_default]
    pub image_url: Option<AttrValue>,
}

#[function_component(BoardView)]
pub fn board_view(props: &Props) -> Html {
    let board_style = props
        .image_url
        .as_ref()
        .map(|url| format!("background-image:url('{url}');background-size:cover;"));

    html! {
        <div class={classes!("board", props.image_url.is_none().then_some("board--placeholder"))}
            style={board_style}>
            { for props.board.iter().enumerate().map(|(index, space)| render_space(index, space)) }
            { render_token(props) }
        </div>
    }
}

fn render_space(index: usize, space: &BoardSpace) -> Html {
    let color = space
        .tile
        .as_ref()
        .map_or_else(|| String::from("#e8e4da"), |tile| tile.color.clone());
    let style = format!(
        "left:{}%;top:{}%;background-color:{color};",
        space.x, space.y
    );
    let kind_class = match space.kind {
        SpaceKind::Start => Some("board-space--start"),
        SpaceKind::Finish => Some("board-space--finish"),
        SpaceKind::Normal => None,
    };
    let label = match space.kind {
        SpaceKind::Start => String::from("S"),
        SpaceKind::Finish => String::from("F"),
        SpaceKind::Normal => (index + 1).to_string(),
    };
    let title = space
        .tile
        .as_ref()
        .map(|tile| format!("{}: {}", tile.name, tile.effect));

    html! {
        <div class={classes!("board-space", kind_class)} style={style} title={title}>
            { label }
        </div>
    }
}

fn render_token(props: &Props) -> Html {
    let Some(space) = props.board.get(props.position) else {
        return Html::default();
    };
    let style = format!("left:{}%;top:{}%;", space.x, space.y);
    html! {
        <div class="board-token" style={style} aria-label="player token">{ "●" }</div>
    }
}
