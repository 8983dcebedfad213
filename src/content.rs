//! Built-in quotation tables and the registry that maps route names onto them.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotationRecord {
    pub text: String,
    pub source_title: String,
    pub author: String,
    pub category: String,
}

impl QuotationRecord {
    pub fn new(text: &str, source_title: &str, author: &str, category: &str) -> Self {
        Self {
            text: text.to_string(),
            source_title: source_title.to_string(),
            author: author.to_string(),
            category: category.to_string(),
        }
    }
}

/// Ordered, non-empty list of quotations. Order is the cycling order.
#[derive(Debug, Clone)]
pub struct ContentSet {
    name: String,
    records: Vec<QuotationRecord>,
}

impl ContentSet {
    /// # Panics
    ///
    /// Panics if `records` is empty. Content tables are embedded at build time,
    /// so an empty one is a programming error.
    pub fn new(name: &str, records: Vec<QuotationRecord>) -> Self {
        assert!(!records.is_empty(), "content set `{name}` must not be empty");
        Self { name: name.to_string(), records }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> &QuotationRecord {
        &self.records[index % self.records.len()]
    }

    pub fn records(&self) -> &[QuotationRecord] {
        &self.records
    }
}

/// Welcome-dialog framing for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteProfile {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub emoji: String,
    pub button_text: String,
    pub description: String,
}

struct Entry {
    profile: RouteProfile,
    content: ContentSet,
}

pub struct ContentRegistry {
    entries: Vec<Entry>,
    default_index: usize,
}

impl ContentRegistry {
    /// Creates a registry whose first route is also the default.
    pub fn new(profile: RouteProfile, content: ContentSet) -> Self {
        Self {
            entries: vec![Entry { profile, content }],
            default_index: 0,
        }
    }

    /// Registers another route. A route with the same name is replaced in place.
    pub fn register(mut self, profile: RouteProfile, content: ContentSet) -> Self {
        match self.position(&profile.name) {
            Some(i) => self.entries[i] = Entry { profile, content },
            None => self.entries.push(Entry { profile, content }),
        }
        self
    }

    /// Moves the default to `route`. Returns `None` if no such route is registered.
    pub fn with_default(mut self, route: &str) -> Option<Self> {
        self.default_index = self.position(route)?;
        Some(self)
    }

    pub fn builtin() -> Self {
        ContentRegistry::new(poems_profile(), ContentSet::new("poems", poems()))
            .register(chen_profile(), ContentSet::new("chen", chen_blessings()))
    }

    /// Content for `route`, or the default content for unknown names.
    pub fn lookup(&self, route: &str) -> &ContentSet {
        &self.entry(route).content
    }

    pub fn profile(&self, route: &str) -> &RouteProfile {
        &self.entry(route).profile
    }

    pub fn contains(&self, route: &str) -> bool {
        self.position(route).is_some()
    }

    pub fn default_route(&self) -> &str {
        &self.entries[self.default_index].profile.name
    }

    /// Route names in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.profile.name.as_str())
    }

    /// Route `step` places after `route`, wrapping around. Unknown routes count as the default.
    pub fn neighbour(&self, route: &str, step: isize) -> &str {
        let len = self.entries.len() as isize;
        let current = self.position(route).unwrap_or(self.default_index) as isize;
        let next = (current + step).rem_euclid(len) as usize;
        &self.entries[next].profile.name
    }

    fn position(&self, route: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.profile.name == route)
    }

    fn entry(&self, route: &str) -> &Entry {
        let index = self.position(route).unwrap_or(self.default_index);
        &self.entries[index]
    }
}

fn poems_profile() -> RouteProfile {
    RouteProfile {
        name: "poems".into(),
        title: "送给你的礼物".into(),
        subtitle: "古诗词漂流瓶".into(),
        emoji: "📜".into(),
        button_text: "✨ 开始阅读".into(),
        description: "一份特别的诗词惊喜".into(),
    }
}

fn chen_profile() -> RouteProfile {
    RouteProfile {
        name: "chen".into(),
        title: "给 Chen 的祝福".into(),
        subtitle: "闪闪发光的你".into(),
        emoji: "✨".into(),
        button_text: "💝 送出祝福".into(),
        description: "愿你永远闪闪发光".into(),
    }
}

const POEMS: &[(&str, &str, &str, &str)] = &[
    ("河西幕中多故人，故人别来三五春。", "凉州馆中与诸判官夜集", "岑参", "古诗文-抒情-离别"),
    ("举杯邀明月，对影成三人。", "月下独酌", "李白", "古诗文-饮酒"),
    ("白日依山尽，黄河入海流。", "登鹳雀楼", "王之涣", "古诗文-登楼"),
    ("春眠不觉晓，处处闻啼鸟。", "春晓", "孟浩然", "古诗文-春天"),
    ("一行白鹭上青天，衬着我渔舟远。", "渔歌子", "张志和", "古诗文-江南"),
    ("明月几时有，把酒问青天。", "水调歌头", "苏轼", "古诗文-中秋"),
    ("众里寻他千百度，蓦然回首，那人却在灯火阑珊处。", "青玉案·元夕", "辛弃疾", "古诗文-元宵"),
    ("十年生死两茫茫，不思量，自难忘。", "江城子·乙卯正月二十日夜记梦", "苏轼", "古诗文-悼亡"),
    ("问君能有几多愁，恰似一江春水向东流。", "虞美人", "李煜", "古诗文-伤感"),
    ("夜阑卧听风吹雨，铁马冰河入梦来。", "十一月四日风雨大作", "陆游", "古诗文-爱国"),
    ("莫言下岭便无难，赚得行人错喜欢。", "题西林壁", "苏轼", "古诗文-哲理"),
    ("人生如逆旅，我亦是行人。", "临江仙", "苏轼", "古诗文-人生"),
    ("独立小桥风满袖，平林新月人归后。", "生查子", "纳兰性德", "古诗文-相思"),
    ("山有木兮木有枝，心悦君兮君不知。", "越人歌", "子晋", "古诗文-爱情"),
];

const CHEN_BLESSINGS: &[(&str, &str, &str, &str)] = &[
    ("祝你岁岁安康，年年如意。", "新年祝福", "From 我", "祝福-新年"),
    ("愿你的每一天都闪闪发光。", "日常祝福", "From 我", "祝福-日常"),
    ("生活如诗，愿你笑靥如常。", "生活祝福", "From 我", "祝福-生活"),
    ("岁月流转，希望你始终闪闪发光。", "成长祝福", "From 我", "祝福-成长"),
    ("每个日子都值得被好好对待。", "励志祝福", "From 我", "祝福-励志"),
    ("愿你永远保有那份热情与温柔。", "品质祝福", "From 我", "祝福-品质"),
    ("所有美好都在不远处等你。", "期许祝福", "From 我", "祝福-期许"),
    ("做一个有梦想的人，走出你的精彩。", "梦想祝福", "From 我", "祝福-梦想"),
    ("愿你的笑容永远灿烂如阳光。", "笑容祝福", "From 我", "祝福-笑容"),
    ("生活再难，也挡不住你闪闪发光。", "坚持祝福", "From 我", "祝福-坚持"),
];

fn records(table: &[(&str, &str, &str, &str)]) -> Vec<QuotationRecord> {
    table
        .iter()
        .map(|(text, origin, author, category)| {
            QuotationRecord::new(text, origin, author, category)
        })
        .collect()
}

fn poems() -> Vec<QuotationRecord> {
    records(POEMS)
}

fn chen_blessings() -> Vec<QuotationRecord> {
    records(CHEN_BLESSINGS)
}
