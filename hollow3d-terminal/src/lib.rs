//! Interactive terminal viewer for Hollow3D shapes

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use hollow3d_core::{asset, ProjectionMode, Shape};
use std::io::{self, stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::CellRenderer;

const ROTATE_STEP: f32 = 0.1;
const TRANSLATE_STEP: f32 = 2.0;
const SCALE_STEP: f32 = 1.1;
const ZOOM_STEP: f32 = 0.1;
const CAMERA_ROTATE_STEP: f32 = 0.1;
// Animation tick increments, applied unconditionally while animating
const ANIMATE_DX: f32 = 0.01;
const ANIMATE_DY: f32 = 0.015;

/// Main application struct for the terminal viewer
pub struct ViewerApp {
    shapes: Vec<Shape>,
    active: usize,
    animate: bool,
    renderer: CellRenderer,
    running: bool,
    frame_period: Duration,
    status: String,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl ViewerApp {
    pub fn new(shapes: Vec<Shape>, target_fps: u64) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            shapes,
            active: 0,
            animate: false,
            renderer: CellRenderer::new(width as usize, height as usize),
            running: true,
            frame_period: Duration::from_millis(1000 / target_fps.max(1)),
            status: String::new(),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Fixed-period animation tick
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.frame_period {
                std::thread::sleep(self.frame_period - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn shape(&mut self) -> &mut Shape {
        &mut self.shapes[self.active]
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            self.status.clear();
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Tab => {
                    self.active = (self.active + 1) % self.shapes.len();
                }

                // Camera projection mode
                KeyCode::Char('1') => self.shape().set_mode(ProjectionMode::Orthographic),
                KeyCode::Char('2') => self.shape().set_mode(ProjectionMode::Perspective),
                KeyCode::Char('3') => self.shape().set_mode(ProjectionMode::Oblique),

                // Model rotation
                KeyCode::Char('w') => self.shape().state.rotate(ROTATE_STEP, 0.0, 0.0),
                KeyCode::Char('s') => self.shape().state.rotate(-ROTATE_STEP, 0.0, 0.0),
                KeyCode::Char('a') => self.shape().state.rotate(0.0, -ROTATE_STEP, 0.0),
                KeyCode::Char('d') => self.shape().state.rotate(0.0, ROTATE_STEP, 0.0),
                KeyCode::Char('e') => self.shape().state.rotate(0.0, 0.0, ROTATE_STEP),
                KeyCode::Char('r') => self.shape().state.rotate(0.0, 0.0, -ROTATE_STEP),

                // Model translation (canvas y grows downward)
                KeyCode::Left => self.shape().state.translate(-TRANSLATE_STEP, 0.0, 0.0),
                KeyCode::Right => self.shape().state.translate(TRANSLATE_STEP, 0.0, 0.0),
                KeyCode::Up => self.shape().state.translate(0.0, -TRANSLATE_STEP, 0.0),
                KeyCode::Down => self.shape().state.translate(0.0, TRANSLATE_STEP, 0.0),
                KeyCode::Char(',') => self.shape().state.translate(0.0, 0.0, -TRANSLATE_STEP),
                KeyCode::Char('.') => self.shape().state.translate(0.0, 0.0, TRANSLATE_STEP),

                // Model scale
                KeyCode::Char('+') | KeyCode::Char('=') => self.shape().state.scale_by(SCALE_STEP),
                KeyCode::Char('-') | KeyCode::Char('_') => {
                    self.shape().state.scale_by(1.0 / SCALE_STEP)
                }

                // Active camera
                KeyCode::Char('[') => self.shape().camera_mut().rotation.y -= CAMERA_ROTATE_STEP,
                KeyCode::Char(']') => self.shape().camera_mut().rotation.y += CAMERA_ROTATE_STEP,
                KeyCode::Char('i') => self.shape().camera_mut().zoom += ZOOM_STEP,
                KeyCode::Char('o') => self.shape().camera_mut().zoom -= ZOOM_STEP,

                // Toggles
                KeyCode::Char(' ') => self.animate = !self.animate,
                KeyCode::Char('l') => {
                    let shading = !self.shape().shading;
                    self.shape().shading = shading;
                }

                KeyCode::Char('0') => self.shape().reset_params(),
                KeyCode::Char('p') => self.export_pose(),
                _ => {}
            }
        }
        Ok(())
    }

    fn update(&mut self) {
        if self.animate {
            self.shape().state.rotate(ANIMATE_DX, ANIMATE_DY, 0.0);
        }
    }

    fn export_pose(&mut self) {
        let shape = &self.shapes[self.active];
        let path = PathBuf::from(format!("{}-pose.json", shape.name));
        match asset::write_pose(shape, &path) {
            Ok(()) => {
                log::info!("exported pose to {}", path.display());
                self.status = format!("exported {}", path.display());
            }
            Err(e) => {
                log::error!("pose export failed: {e}");
                self.status = format!("export failed: {e}");
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        self.renderer.render_shape(&self.shapes[self.active]);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Status overlay
        let shape = &self.shapes[self.active];
        let mode = match shape.mode() {
            ProjectionMode::Orthographic => "ortho",
            ProjectionMode::Perspective => "persp",
            ProjectionMode::Oblique => "oblique",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "hollow3d | {} | {} | fps {:.1}{}{} | tab=shape 1-3=camera wasd/er=rotate \
                 arrows/,.=move +-=scale []=orbit io=zoom space=anim l=shade 0=reset p=export q=quit{}",
                shape.name,
                mode,
                self.fps,
                if self.animate { " | anim" } else { "" },
                if shape.shading { " | lit" } else { "" },
                if self.status.is_empty() {
                    String::new()
                } else {
                    format!(" | {}", self.status)
                },
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
