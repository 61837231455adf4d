use glowline_engine::coords::Vec2;
use glowline_engine::paint::Color;
use glowline_engine::scene::{Scene, ShapeSink};

const GRAVITY: f32 = -30.0;
const RESTITUTION: f32 = 0.92;

#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct Bumper {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// A walled box with round bumpers and bouncing balls, in world units (y up).
#[derive(Debug, Clone)]
pub struct Table {
    width: f32,
    height: f32,
    balls: Vec<Ball>,
    bumpers: Vec<Bumper>,
    ticks: u64,
}

impl Table {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, balls: Vec::new(), bumpers: Vec::new(), ticks: 0 }
    }

    /// The stock layout: three bumpers and a handful of balls.
    pub fn standard() -> Self {
        let mut table = Self::new(60.0, 80.0);
        table.bumpers = vec![
            Bumper { center: Vec2::new(15.0, 45.0), radius: 5.0, color: Color::from_rgb(0xff, 0x8c, 0x00) },
            Bumper { center: Vec2::new(45.0, 45.0), radius: 5.0, color: Color::from_rgb(0xff, 0x8c, 0x00) },
            Bumper { center: Vec2::new(30.0, 25.0), radius: 7.0, color: Color::from_rgb(0xe0, 0x30, 0x60) },
        ];
        let palette = [
            Color::from_rgb(0x40, 0xc0, 0xff),
            Color::from_rgb(0x80, 0xff, 0x80),
            Color::from_rgb(0xff, 0xff, 0x60),
            Color::WHITE,
        ];
        for (i, color) in palette.into_iter().enumerate() {
            let i = i as f32;
            table.balls.push(Ball {
                pos: Vec2::new(8.0 + 12.0 * i, 70.0 - 3.0 * i),
                vel: Vec2::new(9.0 - 5.0 * i, 0.0),
                radius: 1.5 + 0.5 * i,
                color,
            });
        }
        table
    }

    #[inline]
    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    #[cfg(test)]
    #[inline]
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[cfg(test)]
    pub fn add_ball(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let (w, h) = (self.width, self.height);
        for ball in &mut self.balls {
            ball.vel.y += GRAVITY * dt;
            ball.pos = ball.pos + ball.vel * dt;

            let r = ball.radius;
            if ball.pos.x < r {
                ball.pos.x = r;
                ball.vel.x = ball.vel.x.abs() * RESTITUTION;
            } else if ball.pos.x > w - r {
                ball.pos.x = w - r;
                ball.vel.x = -ball.vel.x.abs() * RESTITUTION;
            }
            if ball.pos.y < r {
                ball.pos.y = r;
                // Floor kick keeps the table lively.
                ball.vel.y = ball.vel.y.abs().max(25.0);
            } else if ball.pos.y > h - r {
                ball.pos.y = h - r;
                ball.vel.y = -ball.vel.y.abs() * RESTITUTION;
            }

            for bumper in &self.bumpers {
                let d = ball.pos - bumper.center;
                let dist = d.length();
                let min = bumper.radius + r;
                if dist < min && dist > f32::EPSILON {
                    let n = d * (1.0 / dist);
                    ball.pos = bumper.center + n * min;
                    let vn = ball.vel.dot(n);
                    if vn < 0.0 {
                        ball.vel = ball.vel - n * (2.0 * vn);
                    }
                }
            }
        }
        self.ticks += 1;
    }

    fn walls(&self) -> [Vec2; 5] {
        let (w, h) = (self.width, self.height);
        [Vec2::new(0.0, 0.0), Vec2::new(w, 0.0), Vec2::new(w, h), Vec2::new(0.0, h), Vec2::new(0.0, 0.0)]
    }
}

impl Scene for Table {
    fn draw(&self, sink: &mut dyn ShapeSink) {
        sink.draw_line_path(&self.walls(), Color::from_rgb(0x90, 0x90, 0xa0));

        for bumper in &self.bumpers {
            sink.frame_circle(bumper.center, bumper.radius, bumper.color);
            sink.fill_circle(bumper.center, bumper.radius * 0.4, bumper.color.with_alpha(0x80));
        }

        for ball in &self.balls {
            sink.fill_circle(ball.pos, ball.radius, ball.color);
            // Velocity hint.
            sink.draw_line(ball.pos, ball.pos + ball.vel * 0.05, ball.color.with_alpha(0xa0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Count {
        lines: usize,
        fills: usize,
        frames: usize,
    }

    impl ShapeSink for Count {
        fn draw_line(&mut self, _from: Vec2, _to: Vec2, _color: Color) {
            self.lines += 1;
        }
        fn fill_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
            self.fills += 1;
        }
        fn frame_circle(&mut self, _center: Vec2, _radius: f32, _color: Color) {
            self.frames += 1;
        }
    }

    #[test]
    fn balls_stay_on_the_table() {
        let mut table = Table::standard();
        for _ in 0..3600 {
            table.step(1.0 / 60.0);
        }
        let (w, h) = table.size();
        for ball in table.balls() {
            assert!(ball.pos.is_finite());
            assert!(ball.pos.x >= ball.radius - 1e-3 && ball.pos.x <= w - ball.radius + 1e-3);
            assert!(ball.pos.y >= ball.radius - 1e-3 && ball.pos.y <= h - ball.radius + 1e-3);
        }
        assert_eq!(table.ticks(), 3600);
    }

    #[test]
    fn bumper_pushes_ball_out() {
        let mut table = Table::new(100.0, 100.0);
        table.bumpers.push(Bumper { center: Vec2::new(50.0, 50.0), radius: 10.0, color: Color::WHITE });
        table.add_ball(Ball { pos: Vec2::new(50.0, 61.0), vel: Vec2::new(0.0, -5.0), radius: 2.0, color: Color::WHITE });
        table.step(1.0 / 60.0);

        let ball = &table.balls()[0];
        assert!((ball.pos - Vec2::new(50.0, 50.0)).length() >= 12.0 - 1e-4);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn draws_walls_bumpers_and_balls() {
        let table = Table::standard();
        let mut count = Count::default();
        table.draw(&mut count);
        assert_eq!(count.lines, 4 + table.balls().len());
        assert_eq!(count.frames, 3);
        assert_eq!(count.fills, 3 + table.balls().len());
    }
}
