use std::{fs::File, io::Read, io::BufReader, time::{Instant, Duration}, sync::Arc};
use rodio::{OutputStream, OutputStreamHandle, Sink, Decoder};
use rodio::Source;
use rodio::source::SineWave;
use std::io::Cursor;

fn load_bytes(path: &str) -> Option<Vec<u8>> {
    let mut f = File::open(path).ok()?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).ok()?;
    Some(buf)
}

fn load_bytes_any(paths: &[&str]) -> Option<Vec<u8>> {
    for p in paths {
        if let Some(b) = load_bytes(p) { return Some(b); }
    }
    None
}

pub struct AudioManager {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music_sink: Option<Sink>,
    sfx_sink: Sink,
    foot_sink: Sink,
    step: Option<Arc<Vec<u8>>>,
    win: Option<Arc<Vec<u8>>>,
    lose: Option<Arc<Vec<u8>>>,
    blip: Option<Arc<Vec<u8>>>,
    last_step: Instant,
    step_interval: Duration,
}

impl AudioManager {
    pub fn new() -> Option<Self> {
        let (_stream, handle) = OutputStream::try_default().ok()?;
        let sfx_sink = Sink::try_new(&handle).ok()?;
        let foot_sink = Sink::try_new(&handle).ok()?;
        Some(Self {
            _stream,
            handle,
            music_sink: None,
            sfx_sink,
            foot_sink,
            step: None,
            win: None,
            lose: None,
            blip: None,
            last_step: Instant::now(),
            step_interval: Duration::from_millis(280),
        })
    }

    pub fn load_sfx_auto(&mut self) {
        self.step = load_bytes_any(&[
            "assets/sounds/step.wav",
            "assets/sounds/footstep.wav",
            "assets/sounds/sand.wav",
        ]).map(Arc::new);
        self.win = load_bytes_any(&[
            "assets/sounds/win.wav",
            "assets/sounds/win.ogg",
        ]).map(Arc::new);
        self.lose = load_bytes_any(&[
            "assets/sounds/lose.wav",
            "assets/sounds/lose.ogg",
        ]).map(Arc::new);
        self.blip = load_bytes_any(&[
            "assets/sounds/blip.wav",
            "assets/sounds/select.wav",
        ]).map(Arc::new);
        let found = [&self.step, &self.win, &self.lose, &self.blip].iter().filter(|s| s.is_some()).count();
        log::debug!("loaded {found} of 4 sound effects");
    }

    /// Footsteps are throttled so holding a key does not flood the sink.
    pub fn play_step(&mut self) {
        if self.last_step.elapsed() < self.step_interval { return; }
        self.last_step = Instant::now();
        match self.step.clone() {
            Some(d) => Self::append_data(&self.foot_sink, d, 0.6),
            None => self.foot_sink.append(tone(180.0, 40)),
        }
    }

    pub fn stop_steps(&mut self) {
        self.foot_sink.stop();
        if let Ok(new_sink) = Sink::try_new(&self.handle) {
            self.foot_sink = new_sink;
        }
    }

    pub fn play_win(&self) {
        match self.win.clone() {
            Some(d) => Self::append_data(&self.sfx_sink, d, 1.0),
            None => {
                for hz in [523.0, 659.0, 784.0] {
                    self.sfx_sink.append(tone(hz, 140));
                }
            }
        }
    }

    pub fn play_lose(&self) {
        match self.lose.clone() {
            Some(d) => Self::append_data(&self.sfx_sink, d, 1.0),
            None => {
                for hz in [392.0, 311.0, 220.0] {
                    self.sfx_sink.append(tone(hz, 180));
                }
            }
        }
    }

    pub fn play_blip(&self) {
        match self.blip.clone() {
            Some(d) => Self::append_data(&self.sfx_sink, d, 0.8),
            None => self.sfx_sink.append(tone(880.0, 50)),
        }
    }

    fn append_data(sink: &Sink, data: Arc<Vec<u8>>, vol: f32) {
        if let Ok(dec) = Decoder::new(BufReader::new(Cursor::new(data.as_ref().clone()))) {
            sink.append(dec.amplify(vol.clamp(0.0, 2.5)));
        }
    }

    pub fn play_music_loop_auto(&mut self) {
        if self.music_sink.is_some() { return; }
        let candidates = [
            "assets/sounds/music.wav",
            "assets/sounds/music.ogg",
            "assets/sounds/desert.ogg",
        ];
        if let Some(bytes) = load_bytes_any(&candidates) {
            if let Ok(dec) = Decoder::new_looped(Cursor::new(bytes)) {
                if let Ok(sink) = Sink::try_new(&self.handle) {
                    sink.append(dec);
                    sink.set_volume(0.35);
                    self.music_sink = Some(sink);
                }
            }
        }
    }

    pub fn stop_music(&mut self) {
        if let Some(s) = self.music_sink.take() { s.stop(); }
    }
}

fn tone(hz: f32, millis: u64) -> impl Source<Item = f32> + Send {
    SineWave::new(hz).take_duration(Duration::from_millis(millis)).amplify(0.2)
}
