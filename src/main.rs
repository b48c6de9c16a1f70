use activity_board::App;

fn main() {
    console_error_panic_hook::set_once();
    activity_board::logging::init();
    yew::Renderer::<App>::new().render();
}
