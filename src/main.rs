use glow::HasContext;
use tabletop_scene::{
    abs::{App, GlTextureDevice, Shader, ShaderProgram},
    config::AppConfig,
    error::ShaderError,
    logging,
    render::shapes::ShapeMeshes,
    scene::SceneManager,
};

macro_rules! shader_program {
    ($name:ident, $gl:expr, $path_prefix:literal) => {{
        (|| -> Result<ShaderProgram, ShaderError> {
            let vert = Shader::new(
                &$gl,
                glow::VERTEX_SHADER,
                include_str!(concat!(
                    $path_prefix,
                    "/render/shaders/",
                    stringify!($name),
                    "/vert.glsl"
                )),
            )?;
            let frag = Shader::new(
                &$gl,
                glow::FRAGMENT_SHADER,
                include_str!(concat!(
                    $path_prefix,
                    "/render/shaders/",
                    stringify!($name),
                    "/frag.glsl"
                )),
            )?;
            ShaderProgram::new(&$gl, &[&vert, &frag])
        })()
    }};
}

fn main() {
    let (config, config_error) = AppConfig::load_or_default();

    if let Err(e) = logging::init(config.level_filter(), config.log_file.as_deref()) {
        eprintln!("could not initialize logging: {e}");
    }
    if let Some(e) = config_error {
        log::warn!("{e}, using the default configuration");
    }

    if let Err(e) = run(&config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: &AppConfig) -> Result<(), String> {
    let mut app = App::new(config)?;

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.enable(glow::BLEND);
        app.gl
            .blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
    }

    let shader_program = shader_program!(scene, app.gl, ".").map_err(|e| e.to_string())?;

    let mut scene = SceneManager::new(
        &shader_program,
        GlTextureDevice::new(&app.gl),
        ShapeMeshes::new(&app.gl),
        &config.texture_dir,
    );
    scene.prepare_scene();

    let view = config.camera.view();
    let (width, height) = app.drawable_size();
    let mut projection = config.camera.projection(width, height);
    unsafe {
        app.gl.viewport(0, 0, width as i32, height as i32);
    }

    'running: loop {
        for event in app.event_pump.poll_iter() {
            match event {
                sdl2::event::Event::Quit { .. } => break 'running,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(width, height),
                    ..
                } => {
                    unsafe {
                        app.gl.viewport(0, 0, width, height);
                    }
                    projection = config.camera.projection(width as u32, height as u32);
                }
                _ => {}
            }
        }

        unsafe {
            app.gl.clear_color(0.1, 0.1, 0.12, 1.0);
            app.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        shader_program.use_program();
        shader_program.set_uniform("view", view);
        shader_program.set_uniform("projection", projection);
        scene.render_scene();

        app.window.gl_swap_window();
    }

    Ok(())
}
