//! 公式文本的模式匹配层
//!
//! 逐字符扫描器 + 针对生成端每种形状的专用匹配器：
//! - 点 `(x,y)`（按最后一个逗号分割）
//! - 斜线 `y-A=B\left(x-C\right)`
//! - 竖线 `x=A`（不含平方项）
//! - 抛物线 `(x-A)^2=P(y-C)`
//! - 椭圆 `\frac{\left(x-A\right)^{2}}{B^{2}}+\frac{\left(y-C\right)^{2}}{D^{2}}=1`
//! - 域限制 `\left\{A op v op B\right\}`，op ∈ {\le, \ge, <, >}
//! - 域排除 `\left\{x<A,x>B\right\}`
//!
//! 捕获以借用的数字token切片返回，调用方可就地重写精度。
//! 匹配失败一律返回None，从不报错。

use crate::math::Point2;

/// 斜线捕获：`y-{y1}={slope}\left(x-{x1}\right)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlopedLine<'a> {
    pub y1: &'a str,
    pub slope: &'a str,
    pub x1: &'a str,
}

/// 竖线捕获：`x={x}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalLine<'a> {
    pub x: &'a str,
}

/// 抛物线捕获：`(x-{h})^2={p}(y-{k})`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParabolaForm<'a> {
    pub h: &'a str,
    pub p: &'a str,
    pub k: &'a str,
}

/// 椭圆捕获：标准分式形式的中心与两半轴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EllipseForm<'a> {
    pub h: &'a str,
    pub a: &'a str,
    pub k: &'a str,
    pub b: &'a str,
}

/// 域限制捕获：`\left\{{min}{left_op} {variable}{right_op}{max}\right\}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Restriction<'a> {
    pub min: &'a str,
    pub left_op: &'a str,
    pub variable: char,
    pub right_op: &'a str,
    pub max: &'a str,
}

/// 域排除捕获：`\left\{x<{min},x>{max}\right\}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exclusion<'a> {
    pub min: &'a str,
    pub max: &'a str,
}

/// 逐字符扫描器
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// 消费一个字面量前缀
    fn lit(&mut self, expected: &str) -> Option<()> {
        if self.rest().starts_with(expected) {
            self.pos += expected.len();
            Some(())
        } else {
            None
        }
    }

    /// 消费一个数字token：可选负号 + [0-9.]+
    fn number(&mut self) -> Option<&'a str> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        let mut pos = self.pos;
        if pos < bytes.len() && bytes[pos] == b'-' {
            pos += 1;
        }
        let digits_start = pos;
        while pos < bytes.len() && (bytes[pos].is_ascii_digit() || bytes[pos] == b'.') {
            pos += 1;
        }
        if pos == digits_start {
            return None;
        }
        self.pos = pos;
        Some(&self.input[start..pos])
    }

    /// 消费一个比较算符
    fn comparison(&mut self) -> Option<&'a str> {
        for op in ["\\le", "\\ge", "<", ">"] {
            if self.rest().starts_with(op) {
                self.pos += op.len();
                return Some(op);
            }
        }
        None
    }

    /// 消费一个域变量（x或y）
    fn axis_variable(&mut self) -> Option<char> {
        match self.rest().chars().next() {
            Some(c @ ('x' | 'y')) => {
                self.pos += 1;
                Some(c)
            }
            _ => None,
        }
    }

    /// 跳过至多一个空格
    fn skip_space(&mut self) {
        if self.rest().starts_with(' ') {
            self.pos += 1;
        }
    }
}

/// 解析 `(x,y)` 形式的点；坐标按最后一个逗号分割
pub fn parse_point(latex: &str) -> Option<Point2> {
    let inner = latex.strip_prefix('(')?.strip_suffix(')')?;
    let comma = inner.rfind(',')?;
    let x: f64 = inner[..comma].trim().parse().ok()?;
    let y: f64 = inner[comma + 1..].trim().parse().ok()?;
    Some(Point2::new(x, y))
}

/// 文本是否是一个点
pub fn is_point(latex: &str) -> bool {
    parse_point(latex).is_some()
}

/// 匹配斜线 `y-A=B\left(x-C\right)`
pub fn match_sloped_line(latex: &str) -> Option<SlopedLine<'_>> {
    let mut s = Scanner::new(latex);
    s.lit("y-")?;
    let y1 = s.number()?;
    s.lit("=")?;
    let slope = s.number()?;
    s.lit("\\left(x-")?;
    let x1 = s.number()?;
    s.lit("\\right)")?;
    Some(SlopedLine { y1, slope, x1 })
}

/// 匹配竖线 `x=A`；含平方项的文本不算竖线
pub fn match_vertical_line(latex: &str) -> Option<VerticalLine<'_>> {
    if latex.contains("^{2}") || latex.contains("^2") {
        return None;
    }
    let mut s = Scanner::new(latex);
    s.lit("x=")?;
    let x = s.number()?;
    Some(VerticalLine { x })
}

/// 匹配抛物线 `(x-A)^2=P(y-C)`，接受带花括号的平方指数
pub fn match_parabola(latex: &str) -> Option<ParabolaForm<'_>> {
    let mut s = Scanner::new(latex);
    s.lit("(x-")?;
    let h = s.number()?;
    s.lit(")")?;
    if s.lit("^{2}").is_none() {
        s.lit("^2")?;
    }
    s.lit("=")?;
    let p = s.number()?;
    if s.lit("\\left(y-").is_none() {
        s.lit("(y-")?;
    }
    let k = s.number()?;
    if s.lit("\\right)").is_none() {
        s.lit(")")?;
    }
    Some(ParabolaForm { h, p, k })
}

/// 匹配椭圆标准分式形式
pub fn match_ellipse(latex: &str) -> Option<EllipseForm<'_>> {
    let mut s = Scanner::new(latex);
    s.lit("\\frac{\\left(x-")?;
    let h = s.number()?;
    s.lit("\\right)^{2}}{")?;
    let a = s.number()?;
    s.lit("^{2}}+\\frac{\\left(y-")?;
    let k = s.number()?;
    s.lit("\\right)^{2}}{")?;
    let b = s.number()?;
    s.lit("^{2}}=1")?;
    Some(EllipseForm { h, a, k, b })
}

/// 在文本任意位置查找域限制后缀
pub fn find_restriction(latex: &str) -> Option<Restriction<'_>> {
    scan_braced(latex, match_restriction_at)
}

/// 在文本任意位置查找域排除后缀
pub fn find_exclusion(latex: &str) -> Option<Exclusion<'_>> {
    scan_braced(latex, match_exclusion_at)
}

/// 对每处`\left\{`起点依次尝试匹配器
fn scan_braced<'a, T>(latex: &'a str, matcher: fn(&'a str) -> Option<T>) -> Option<T> {
    let mut from = 0;
    while let Some(offset) = latex[from..].find("\\left\\{") {
        let start = from + offset;
        if let Some(found) = matcher(&latex[start..]) {
            return Some(found);
        }
        from = start + 1;
    }
    None
}

fn match_restriction_at(input: &str) -> Option<Restriction<'_>> {
    let mut s = Scanner::new(input);
    s.lit("\\left\\{")?;
    let min = s.number()?;
    let left_op = s.comparison()?;
    s.skip_space();
    let variable = s.axis_variable()?;
    let right_op = s.comparison()?;
    s.skip_space();
    let max = s.number()?;
    s.lit("\\right\\}")?;
    Some(Restriction {
        min,
        left_op,
        variable,
        right_op,
        max,
    })
}

fn match_exclusion_at(input: &str) -> Option<Exclusion<'_>> {
    let mut s = Scanner::new(input);
    s.lit("\\left\\{x<")?;
    let min = s.number()?;
    s.lit(",x>")?;
    let max = s.number()?;
    s.lit("\\right\\}")?;
    Some(Exclusion { min, max })
}
