use crate::events::AppEvent;
use crate::gui::canvas::CairoSurface;
use crate::gui::host::{GtkHost, LoggingListener};
use crate::gui::theme;
use circle_display::config::GaugeConfig;
use circle_display::protocol::{ControlCommand, REFRESH_TOTAL};
use circle_display::{Action, CircleDisplay, Point, PointerAction, PointerEvent};
use gtk::prelude::*;
use gtk4 as gtk;
use rand::Rng;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

pub struct AppModel {
    pub display: Rc<RefCell<CircleDisplay>>,
    pub host: GtkHost,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Command(ControlCommand),
    ConfigLoaded(Box<GaugeConfig>),
    Resize,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Command(cmd) => AppMsg::Command(cmd),
            AppEvent::ConfigLoaded(config) => AppMsg::ConfigLoaded(config),
        }
    }
}

fn drag_point(gesture: &gtk::GestureDrag, offset_x: f64, offset_y: f64) -> Point {
    let (x, y) = gesture.start_point().unwrap_or_default();
    Point::new(x + offset_x, y + offset_y)
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (GaugeConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Circle Display"),
            set_default_width: 480,
            set_default_height: 480,

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "circle-display-area",

                connect_resize[sender] => move |_, _, _| {
                    sender.input(AppMsg::Resize);
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(PointerEvent::new(
                            PointerAction::Down,
                            Point::new(x, y),
                            Instant::now(),
                        )));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        sender.input(AppMsg::Pointer(PointerEvent::new(
                            PointerAction::Move,
                            drag_point(gesture, dx, dy),
                            Instant::now(),
                        )));
                    },
                    connect_drag_end[sender] => move |gesture, dx, dy| {
                        sender.input(AppMsg::Pointer(PointerEvent::new(
                            PointerAction::Up,
                            drag_point(gesture, dx, dy),
                            Instant::now(),
                        )));
                    },
                    connect_cancel[sender] => move |gesture, _| {
                        let (dx, dy) = gesture.offset().unwrap_or_default();
                        sender.input(AppMsg::Pointer(PointerEvent::new(
                            PointerAction::Cancel,
                            drag_point(gesture, dx, dy),
                            Instant::now(),
                        )));
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let mut display = CircleDisplay::from_config(&config);
        display.set_selection_listener(Some(Box::new(LoggingListener)));
        let display = Rc::new(RefCell::new(display));

        let widgets = view_output!();

        let model = AppModel {
            host: GtkHost::new(&widgets.drawing_area, &display),
            display: display.clone(),
            drawing_area: widgets.drawing_area.clone(),
        };

        widgets
            .drawing_area
            .set_draw_func(move |_, cr, width, height| {
                let mut surface = CairoSurface::new(cr, width, height);
                if let Err(e) = display.borrow_mut().render(&mut surface) {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.display.borrow_mut().sync_layout(&model.host);
        let initial = &config.initial;
        let action = model
            .display
            .borrow_mut()
            .show_value(initial.value, initial.total, initial.animated);
        model.dispatch(action);

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(event) => {
                let action = self.display.borrow_mut().handle_pointer(&event);
                if let Some(action) = action {
                    self.dispatch(action);
                }
            }
            AppMsg::Command(cmd) => {
                if let Some(action) = self.run_command(cmd) {
                    self.dispatch(action);
                }
            }
            AppMsg::ConfigLoaded(config) => {
                let mut display = self.display.borrow_mut();
                display.apply_config(&config);
                display.sync_layout(&self.host);
                drop(display);
                self.drawing_area.queue_draw();
                log::info!("Configuration applied");
            }
            AppMsg::Resize => {
                self.display.borrow_mut().sync_layout(&self.host);
                self.drawing_area.queue_draw();
            }
        }
    }
}

impl AppModel {
    fn run_command(&self, cmd: ControlCommand) -> Option<Action> {
        let mut display = self.display.borrow_mut();
        match cmd {
            ControlCommand::Show {
                value,
                total,
                animated,
            } => Some(display.show_value(value, total, animated)),
            ControlCommand::Replay => Some(display.start_anim()),
            ControlCommand::Refresh => {
                let value = rand::rng().random_range(0.0..REFRESH_TOTAL);
                Some(display.show_value(value, REFRESH_TOTAL, true))
            }
            ControlCommand::Reload => {
                log::debug!("Reload reached the UI thread, the service thread loads configs");
                None
            }
        }
    }

    fn dispatch(&self, action: Action) {
        action.dispatch(&self.host);
    }
}
