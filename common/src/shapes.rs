use rand::Rng;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Capability set shared by every query shape.
///
/// Rectangle containment follows the half-open rule: the left and top edges are
/// inside, the right and bottom edges are outside.
pub trait Shape: Debug {
    fn contains_point(&self, point: Point) -> bool;
    fn contains_rect(&self, rect: &Rectangle) -> bool;
    fn intersects_rect(&self, rect: &Rectangle) -> bool;
    /// Re-centers the shape on `point`.
    fn move_to(&mut self, point: Point);
    fn bounding_box(&self) -> Rectangle;
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.y >= self.top()
            && point.x < self.right()
            && point.y < self.bottom()
    }

    /// Full containment. The candidate's bottom-right corner must sit strictly
    /// before ours, matching `contains_point`.
    pub fn contains_rect(&self, rect: &Rectangle) -> bool {
        rect.left() >= self.left()
            && rect.top() >= self.top()
            && rect.right() < self.right()
            && rect.bottom() < self.bottom()
    }

    /// Overlap on closed intervals; touching edges intersect.
    pub fn intersects_rect(&self, rect: &Rectangle) -> bool {
        self.left() <= rect.right()
            && self.right() >= rect.left()
            && self.top() <= rect.bottom()
            && self.bottom() >= rect.top()
    }

    pub fn move_to(&mut self, point: Point) {
        self.x = point.x - self.width / 2.0;
        self.y = point.y - self.height / 2.0;
    }

    /// Point on (or inside) the rectangle closest to `point`.
    pub fn clamp_point(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(self.left(), self.right()),
            point.y.clamp(self.top(), self.bottom()),
        )
    }

    /// The four equal quadrants in NW, NE, SW, SE order.
    pub fn quadrants(&self) -> [Rectangle; 4] {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        [
            Rectangle::new(self.x, self.y, half_w, half_h),
            Rectangle::new(self.x + half_w, self.y, half_w, half_h),
            Rectangle::new(self.x, self.y + half_h, half_w, half_h),
            Rectangle::new(self.x + half_w, self.y + half_h, half_w, half_h),
        ]
    }

    /// Random rectangle of at most `max_width` x `max_height` whose origin
    /// lies inside `self`.
    pub fn random_rect_inside<R: Rng>(
        &self,
        max_width: f32,
        max_height: f32,
        rng: &mut R,
    ) -> Rectangle {
        let width = self._safe_randf32(rng, 0.0, max_width.min(self.width));
        let height = self._safe_randf32(rng, 0.0, max_height.min(self.height));
        Rectangle::new(
            self._safe_randf32(rng, self.left(), self.right() - width),
            self._safe_randf32(rng, self.top(), self.bottom() - height),
            width,
            height,
        )
    }

    fn _safe_randf32<R: Rng>(&self, rng: &mut R, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        rng.gen_range(min..max)
    }
}

impl Shape for Rectangle {
    fn contains_point(&self, point: Point) -> bool {
        Rectangle::contains_point(self, point)
    }

    fn contains_rect(&self, rect: &Rectangle) -> bool {
        Rectangle::contains_rect(self, rect)
    }

    fn intersects_rect(&self, rect: &Rectangle) -> bool {
        Rectangle::intersects_rect(self, rect)
    }

    fn move_to(&mut self, point: Point) {
        Rectangle::move_to(self, point)
    }

    fn bounding_box(&self) -> Rectangle {
        *self
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f32,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self {
            center: Point::new(x, y),
            radius,
        }
    }

    pub fn x(&self) -> f32 {
        self.center.x
    }

    pub fn y(&self) -> f32 {
        self.center.y
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// A circle holds a rectangle when it holds all four corners.
    pub fn contains_rect(&self, rect: &Rectangle) -> bool {
        self.contains_point(rect.top_left())
            && self.contains_point(rect.top_right())
            && self.contains_point(rect.bottom_left())
            && self.contains_point(rect.bottom_right())
    }

    pub fn intersects_rect(&self, rect: &Rectangle) -> bool {
        self.center.distance(rect.clamp_point(self.center)) <= self.radius
    }

    pub fn move_to(&mut self, point: Point) {
        self.center = point;
    }

    pub fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

impl Shape for Circle {
    fn contains_point(&self, point: Point) -> bool {
        Circle::contains_point(self, point)
    }

    fn contains_rect(&self, rect: &Rectangle) -> bool {
        Circle::contains_rect(self, rect)
    }

    fn intersects_rect(&self, rect: &Rectangle) -> bool {
        Circle::intersects_rect(self, rect)
    }

    fn move_to(&mut self, point: Point) {
        Circle::move_to(self, point)
    }

    fn bounding_box(&self) -> Rectangle {
        Circle::bounding_box(self)
    }
}

/// Query region accepted by the index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeEnum {
    Circle(Circle),
    Rectangle(Rectangle),
}

impl Shape for ShapeEnum {
    fn contains_point(&self, point: Point) -> bool {
        match self {
            ShapeEnum::Circle(circle) => circle.contains_point(point),
            ShapeEnum::Rectangle(rectangle) => rectangle.contains_point(point),
        }
    }

    fn contains_rect(&self, rect: &Rectangle) -> bool {
        match self {
            ShapeEnum::Circle(circle) => circle.contains_rect(rect),
            ShapeEnum::Rectangle(rectangle) => rectangle.contains_rect(rect),
        }
    }

    fn intersects_rect(&self, rect: &Rectangle) -> bool {
        match self {
            ShapeEnum::Circle(circle) => circle.intersects_rect(rect),
            ShapeEnum::Rectangle(rectangle) => rectangle.intersects_rect(rect),
        }
    }

    fn move_to(&mut self, point: Point) {
        match self {
            ShapeEnum::Circle(circle) => circle.move_to(point),
            ShapeEnum::Rectangle(rectangle) => rectangle.move_to(point),
        }
    }

    fn bounding_box(&self) -> Rectangle {
        match self {
            ShapeEnum::Circle(circle) => circle.bounding_box(),
            ShapeEnum::Rectangle(rectangle) => *rectangle,
        }
    }
}

impl From<Rectangle> for ShapeEnum {
    fn from(rectangle: Rectangle) -> Self {
        ShapeEnum::Rectangle(rectangle)
    }
}

impl From<Circle> for ShapeEnum {
    fn from(circle: Circle) -> Self {
        ShapeEnum::Circle(circle)
    }
}
