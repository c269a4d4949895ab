use std::collections::VecDeque;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoopProxy};
use winit::window::Window;

use lumen::commands::Cmd;
use lumen::events::ViewerEvent;
use lumen::geometry::{Point, Size};
use lumen::image::load_image;
use lumen::messages::{AppMsg, KeyMsg, PointerMsg, ViewerMsg, ViewportMsg};
use lumen::model::ViewerModel;
use lumen::tracing::ViewerSnapshot;
use lumen::update::update;
use lumen::view::Renderer;

use super::input::{map_button, map_key, wheel_delta, KeyAction};

const DEFAULT_WINDOW_SIZE: (u32, u32) = (1024, 768);

pub struct App {
    model: ViewerModel,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    /// Image to open once the window exists
    initial_image: Option<PathBuf>,
    /// Wakes the event loop with messages from decode threads
    proxy: EventLoopProxy<ViewerMsg>,
    should_exit: bool,
}

impl App {
    pub fn new(
        model: ViewerModel,
        initial_image: Option<PathBuf>,
        proxy: EventLoopProxy<ViewerMsg>,
    ) -> Self {
        Self {
            model,
            renderer: None,
            window: None,
            context: None,
            initial_image,
            proxy,
            should_exit: false,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = DEFAULT_WINDOW_SIZE;
        let window_attributes = Window::default_attributes()
            .with_title(self.model.title())
            .with_inner_size(PhysicalSize::new(width, height));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;
        let renderer = Renderer::new(Rc::clone(&window), &context, &self.model.config)?;

        let size = window.inner_size();
        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);

        self.dispatch(ViewportMsg::Resize(Size::new(size.width as f64, size.height as f64)).into());
        if let Some(path) = self.initial_image.take() {
            self.dispatch(AppMsg::LoadImage(path).into());
        }
        Ok(())
    }

    /// Run a message through update, then every follow-up message its
    /// commands and notifications produce. Returns true if a repaint is needed.
    fn dispatch(&mut self, msg: ViewerMsg) -> bool {
        let mut queue = VecDeque::from([msg]);
        let mut needs_redraw = false;

        while let Some(msg) = queue.pop_front() {
            let before = cfg!(debug_assertions).then(|| ViewerSnapshot::from_model(&self.model));
            let cmd = update(&mut self.model, msg, Instant::now());
            if let Some(diff) = before.and_then(|b| b.diff(&ViewerSnapshot::from_model(&self.model)))
            {
                tracing::trace!("{}", diff);
            }

            for event in self.model.drain_events() {
                match event {
                    ViewerEvent::NavLeftClicked => queue.push_back(AppMsg::OpenSibling(-1).into()),
                    ViewerEvent::NavRightClicked => queue.push_back(AppMsg::OpenSibling(1).into()),
                    other => tracing::trace!("{:?}", other),
                }
            }

            if let Some(cmd) = cmd {
                needs_redraw |= cmd.needs_redraw();
                self.process_cmd(cmd);
            }
        }
        needs_redraw
    }

    fn process_cmd(&self, cmd: Cmd) {
        for cmd in cmd.flatten() {
            match cmd {
                Cmd::None | Cmd::Redraw => {}
                Cmd::UpdateTitle => {
                    if let Some(window) = &self.window {
                        window.set_title(&self.model.title());
                    }
                }
                Cmd::SaveConfig => {
                    if let Err(e) = self.model.config.save() {
                        tracing::warn!("{}", e);
                    }
                }
                Cmd::OpenPath(path) => {
                    let proxy = self.proxy.clone();
                    let max_texture_size = self.model.config.max_texture_size;
                    std::thread::spawn(move || {
                        let result = load_image(&path, max_texture_size);
                        if proxy
                            .send_event(AppMsg::Decoded { path, result }.into())
                            .is_err()
                        {
                            tracing::debug!("Event loop closed before decode finished");
                        }
                    });
                }
                Cmd::Batch(_) => {}
            }
        }
    }

    fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Resized(size) => self.dispatch(
                ViewportMsg::Resize(Size::new(size.width as f64, size.height as f64)).into(),
            ),
            WindowEvent::CursorMoved { position, .. } => self.dispatch(
                PointerMsg::Move {
                    position: Point::new(position.x, position.y),
                }
                .into(),
            ),
            WindowEvent::CursorLeft { .. } => self.dispatch(PointerMsg::Left.into()),
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = map_button(*button) else {
                    return false;
                };
                let position = self.model.pointer;
                let msg = match state {
                    ElementState::Pressed => PointerMsg::Down { position, button },
                    ElementState::Released => PointerMsg::Up { position, button },
                };
                self.dispatch(msg.into())
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let position = self.model.pointer;
                self.dispatch(
                    PointerMsg::Wheel {
                        delta: wheel_delta(*delta),
                        position,
                    }
                    .into(),
                )
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;
                match map_key(&event.logical_key, pressed) {
                    Some(KeyAction::Quit) => {
                        self.should_exit = true;
                        false
                    }
                    Some(KeyAction::Msg(msg)) => self.dispatch(msg),
                    None => false,
                }
            }
            WindowEvent::Focused(false) => self.dispatch(KeyMsg::ReleaseAll.into()),
            WindowEvent::RedrawRequested => {
                self.redraw();
                false
            }
            _ => false,
        }
    }

    fn redraw(&mut self) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render(&mut self.model) {
            Ok(Some(report)) => {
                for err in &report.skipped {
                    tracing::debug!("Layer skipped: {}", err);
                }
                if report.animation_stopped {
                    tracing::warn!("Animation stopped after a draw failure");
                }
            }
            Ok(None) => {}
            Err(e) => tracing::error!("Render failed: {}", e),
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler<ViewerMsg> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, msg: ViewerMsg) {
        if self.dispatch(msg) {
            self.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let is_ours = self.window.as_ref().is_some_and(|w| w.id() == window_id);
        if !is_ours {
            return;
        }
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if self.handle_event(&event) {
            self.request_redraw();
        }
        if self.should_exit {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if self.model.next_deadline().is_some_and(|due| due <= now)
            && self.dispatch(AppMsg::Tick.into())
        {
            self.request_redraw();
        }

        match self.model.next_deadline() {
            Some(due) => event_loop.set_control_flow(ControlFlow::WaitUntil(due)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
