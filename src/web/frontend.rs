//! Embedded HTML/CSS/JS frontend for the opsdeck web dashboard.
//!
//! The entire SPA is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>opsdeck</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { display: flex; min-height: 100vh; }

.sidebar {
  width: 200px;
  background: var(--surface);
  border-right: 1px solid var(--border);
  padding: 20px 12px;
}
.sidebar h1 { font-size: 18px; padding: 0 10px 16px; color: var(--accent); font-family: var(--mono); }
.nav-item {
  display: block; width: 100%; text-align: left;
  background: none; border: none; color: var(--text-muted);
  padding: 8px 10px; border-radius: var(--radius);
  font-size: 14px; cursor: pointer;
}
.nav-item:hover { color: var(--text); background: rgba(255,255,255,0.04); }
.nav-item.is-active { color: var(--text); background: rgba(88,166,255,0.15); }

.main { flex: 1; padding: 24px; max-width: 960px; }

.topbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 20px; }
.topbar h2 { font-size: 20px; }
.topbar .actions { display: flex; gap: 8px; }

.btn {
  background: var(--surface); color: var(--text);
  border: 1px solid var(--border); border-radius: var(--radius);
  padding: 6px 12px; font-size: 13px; cursor: pointer;
}
.btn:hover { border-color: var(--accent); }
.btn-danger { color: var(--red); }

.cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 14px; }
.card {
  background: var(--surface); border: 1px solid var(--border);
  border-radius: var(--radius); padding: 14px;
}
.card .title { font-weight: 600; margin-bottom: 6px; }
.card .meta { color: var(--text-muted); font-size: 12px; }

.pill {
  display: inline-flex; align-items: center; gap: 6px;
  padding: 2px 10px; border-radius: 999px; font-size: 12px; font-weight: 600;
  background: rgba(139,148,158,0.15); color: var(--text-muted);
}
.pill .dot { width: 8px; height: 8px; border-radius: 50%; background: currentColor; }
.pill.good { background: rgba(63,185,80,0.15); color: var(--green); }
.pill.warn { background: rgba(210,153,34,0.15); color: var(--yellow); }
.pill.bad  { background: rgba(248,81,73,0.15); color: var(--red); }

table { width: 100%; border-collapse: collapse; margin-top: 12px; }
th, td { text-align: left; padding: 8px 10px; border-bottom: 1px solid var(--border); font-size: 13px; }
th { color: var(--text-muted); font-weight: 600; }

.switch-row { display: flex; justify-content: space-between; align-items: center; padding: 10px 0; border-bottom: 1px solid var(--border); }
.switch-name { font-weight: 600; }
.switch-desc { color: var(--text-muted); font-size: 12px; }
.toggle {
  width: 40px; height: 22px; border-radius: 999px;
  background: var(--border); position: relative; cursor: pointer; flex-shrink: 0;
}
.toggle::after {
  content: ""; position: absolute; top: 2px; left: 2px;
  width: 18px; height: 18px; border-radius: 50%; background: var(--text-muted);
  transition: left 0.15s;
}
.toggle.is-on { background: rgba(63,185,80,0.4); }
.toggle.is-on::after { left: 20px; background: var(--green); }

.logbox {
  background: var(--bg); border: 1px solid var(--border); border-radius: var(--radius);
  padding: 12px; font-family: var(--mono); font-size: 12px;
  white-space: pre-wrap; max-height: 480px; overflow-y: auto;
}
.log-warn { color: var(--yellow); }
.log-bad { color: var(--red); }

label { display: block; margin: 10px 0 4px; color: var(--text-muted); font-size: 12px; }
input, textarea {
  width: 100%; background: var(--bg); color: var(--text);
  border: 1px solid var(--border); border-radius: var(--radius);
  padding: 7px 10px; font-size: 13px; font-family: var(--mono);
}
textarea { min-height: 90px; }

#toast {
  position: fixed; bottom: 20px; right: 20px;
  background: var(--surface); border: 1px solid var(--border);
  border-radius: var(--radius); padding: 10px 16px; font-size: 13px;
  opacity: 0; transition: opacity 0.2s; pointer-events: none;
}
#toast.is-show { opacity: 1; }
#toast.warn { border-color: var(--yellow); }
#toast.bad { border-color: var(--red); }

.section-title { margin: 18px 0 6px; font-size: 15px; font-weight: 600; }
</style>
</head>
<body>
<div class="app">
  <nav class="sidebar">
    <h1>opsdeck</h1>
    <div id="nav"></div>
  </nav>
  <main class="main">
    <div class="topbar">
      <h2 id="panelTitle">Overview</h2>
      <div class="actions">
        <button class="btn" id="btnHealth">Run health check</button>
        <button class="btn" id="btnBackup">Backup all</button>
        <button class="btn" id="btnLock">Lock UI</button>
      </div>
    </div>
    <div id="content"></div>
  </main>
</div>
<div id="toast"></div>

<script>
"use strict";

const ROUTES = [
  ["overview", "Overview"],
  ["orchestrator", "Orchestrator"],
  ["videos", "Video Queue"],
  ["hero", "Hero Preview"],
  ["switches", "Switch Control"],
  ["logs", "Logs"],
  ["settings", "Connections"]
];

let app = { route: "overview", state: null, rows: null, logs: null };

const $ = (sel) => document.querySelector(sel);

let toastTimer = null;
function toast(notice) {
  const el = $("#toast");
  el.textContent = notice.message;
  el.className = "is-show " + (notice.level || "info");
  if (toastTimer) clearTimeout(toastTimer);
  toastTimer = setTimeout(() => { el.className = ""; }, 2200);
}

async function api(method, path, body) {
  const opts = { method, headers: { "Content-Type": "application/json" } };
  if (body !== undefined) opts.body = JSON.stringify(body);
  const res = await fetch(path, opts);
  const data = await res.json();
  if (data.notice) toast(data.notice);
  else if (data.error) toast({ level: "bad", message: data.error });
  return data;
}

async function loadState() {
  app.state = await api("GET", "/api/state");
}

function pill(s) {
  return `<span class="pill ${s.status}"><span class="dot"></span>${s.status.toUpperCase()}</span>`;
}

function esc(v) {
  return String(v ?? "—").replace(/[&<>"']/g, (c) => ({
    "&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;", "'": "&#39;"
  })[c]);
}

const TARGETS = [
  ["orchestrator", "Orchestrator"],
  ["videos", "Video Queue"],
  ["hero", "Hero Feed"]
];

function renderOverview() {
  const st = app.state;
  let cards = TARGETS.map(([key, name]) => {
    const s = st.status[key];
    return `<div class="card">
      <div class="title">${name}</div>
      ${pill(s)}
      <div class="meta">Note: ${esc(s.note)}</div>
      <div class="meta">Last check: ${esc(s.at)}</div>
      <div style="margin-top:8px">
        <button class="btn" onclick="runHealth('${key}')">Check</button>
        <button class="btn" onclick="runBackup('${key}')">Backup</button>
      </div>
    </div>`;
  }).join("");
  const g = st.switches.global;
  return `<div class="cards">${cards}</div>
    <div class="section-title">Summary</div>
    <div class="card">
      <div class="meta">Maintenance: ${g.maintenance_mode ? "ON" : "OFF"}
        &nbsp; Backups: ${g.feature_backups ? "Enabled" : "Disabled"}
        &nbsp; Orchestrator: ${st.settings.orchestrator.base_url ? "Configured" : "Not connected"}</div>
      <div class="meta">Last activity: ${esc(st.last_activity)} &nbsp; Log entries: ${st.log_count}</div>
    </div>`;
}

function renderTarget(key, name) {
  const s = app.state.status[key];
  return `<div class="card">
    <div class="title">${name}</div>
    ${pill(s)}
    <div class="meta">Note: ${esc(s.note)}</div>
    <div class="meta">Last check: ${esc(s.at)}</div>
    <div style="margin-top:8px"><button class="btn" onclick="runHealth('${key}')">Check now</button></div>
  </div>`;
}

function renderVideos() {
  const rows = (app.rows && app.rows.rows) || [];
  const cols = app.state.settings.videos.columns.split(",").map(c => c.trim()).filter(Boolean);
  const defaults = ["title", "status", "video_url", "lang"];
  const keys = defaults.map((d, i) => cols[i] || d);
  const head = keys.map(k => `<th>${esc(k)}</th>`).join("");
  const body = rows.map(r =>
    `<tr>${keys.map((k, i) => `<td>${esc(r[k] ?? r[defaults[i]])}</td>`).join("")}</tr>`
  ).join("");
  return renderTarget("videos", "Video Queue") +
    `<table><thead><tr>${head}</tr></thead><tbody>${body}</tbody></table>
     <div class="meta" style="margin-top:8px">${rows.length} rows</div>`;
}

function renderHero() {
  const cats = (app.rows && app.rows.categories) || [];
  const products = (app.rows && app.rows.products) || [];
  const catItems = cats.map(c => `<li>${esc(c.name ?? JSON.stringify(c))}</li>`).join("");
  const prodItems = products.map(p => `<li>${esc(p.name ?? p.title)}</li>`).join("");
  return renderTarget("hero", "Hero Feed") +
    `<div class="section-title">Categories (${cats.length})</div><ul>${catItems}</ul>
     <div class="section-title">Products (${products.length})</div><ul>${prodItems}</ul>`;
}

function renderSwitches() {
  const st = app.state;
  return Object.entries(st.switch_meta).map(([scope, metas]) => {
    const rows = metas.map(m => {
      const on = st.switches[scope][m.key];
      return `<div class="switch-row">
        <div><div class="switch-name">${esc(m.name)}</div><div class="switch-desc">${esc(m.desc)}</div></div>
        <div class="toggle ${on ? "is-on" : ""}" role="switch" aria-checked="${on}"
             onclick="toggleSwitch('${scope}','${m.key}')"></div>
      </div>`;
    }).join("");
    return `<div class="section-title">${esc(scope)}</div><div class="card">${rows}</div>`;
  }).join("") + `<div style="margin-top:12px">
    <button class="btn" onclick="saveSwitches()">Save</button>
    <button class="btn btn-danger" onclick="resetSwitches()">Reset to defaults</button>
  </div>`;
}

function renderLogs() {
  const entries = (app.logs && app.logs.entries) || [];
  const lines = entries.map(e => {
    const cls = e.level === "bad" ? "log-bad" : e.level === "warn" ? "log-warn" : "";
    return `<div class="${cls}">[${esc(e.time)}] [${e.level.toUpperCase()}] [${esc(e.scope)}] ${esc(e.message)}</div>`;
  }).join("");
  return `<div style="margin-bottom:10px">
      <button class="btn" onclick="clearLogs()">Clear</button>
      <a class="btn" href="/api/logs/export" download>Export JSON</a>
    </div>
    <div class="logbox">${lines || "No log entries."}</div>`;
}

function renderSettings() {
  const s = app.state.settings;
  return `<div class="card">
    <label>orchestrator.base_url</label><input id="f_base" value="${esc(s.orchestrator.base_url)}">
    <label>table_store.url</label><input id="f_store" value="${esc(s.table_store.url)}">
    <label>table_store.api_key</label><input id="f_key" value="${esc(s.table_store.api_key)}">
    <label>videos.table</label><input id="f_table" value="${esc(s.videos.table)}">
    <label>videos.columns</label><input id="f_cols" value="${esc(s.videos.columns)}">
    <label>videos.order</label><input id="f_order" value="${esc(s.videos.order)}">
    <label>videos.limit</label><input id="f_limit" value="${s.videos.limit}">
    <label>hero.products_table</label><input id="f_products" value="${esc(s.hero.products_table)}">
    <label>hero.categories (JSON array)</label><textarea id="f_cats">${esc(s.hero.categories)}</textarea>
    <div style="margin-top:12px">
      <button class="btn" onclick="saveSettings()">Save</button>
      <button class="btn btn-danger" onclick="resetSettings()">Reset to defaults</button>
    </div>
  </div>`;
}

function render() {
  const titles = Object.fromEntries(ROUTES);
  $("#panelTitle").textContent = titles[app.route] || "Overview";
  $("#nav").innerHTML = ROUTES.map(([route, label]) =>
    `<button class="nav-item ${route === app.route ? "is-active" : ""}"
             onclick="navigate('${route}')">${label}</button>`
  ).join("");
  $("#btnLock").textContent = app.state.locked ? "Unlock UI" : "Lock UI";

  const content = {
    overview: renderOverview,
    orchestrator: () => renderTarget("orchestrator", "Orchestrator"),
    videos: renderVideos,
    hero: renderHero,
    switches: renderSwitches,
    logs: renderLogs,
    settings: renderSettings
  }[app.route];
  $("#content").innerHTML = content();
}

// ---- actions -------------------------------------------------------------

async function navigate(route) {
  app.route = route;
  await api("POST", "/api/navigate", { route });
  await loadState();
  if (route === "videos" || route === "hero") app.rows = await api("GET", "/api/rows");
  if (route === "logs") app.logs = await api("GET", "/api/logs?limit=80");
  render();
}

async function runHealth(target) {
  await api("POST", "/api/health/run", target ? { target } : {});
  await loadState();
  if (target === "videos" || target === "hero") app.rows = await api("GET", "/api/rows");
  render();
}

async function runBackup(target) {
  await api("POST", "/api/backup", target ? { target } : {});
  await loadState();
  render();
}

async function toggleSwitch(scope, key) {
  const data = await api("POST", "/api/switches/toggle", { scope, key });
  if (data.switches) app.state.switches = data.switches;
  render();
}

async function saveSwitches() {
  await api("PUT", "/api/switches", app.state.switches);
  await loadState();
  render();
}

async function resetSwitches() {
  await api("POST", "/api/switches/reset", {});
  await loadState();
  render();
}

async function saveSettings() {
  const settings = {
    orchestrator: { base_url: $("#f_base").value.trim() },
    table_store: { url: $("#f_store").value.trim(), api_key: $("#f_key").value.trim() },
    videos: {
      table: $("#f_table").value.trim(),
      columns: $("#f_cols").value.trim(),
      order: $("#f_order").value.trim(),
      limit: parseInt($("#f_limit").value, 10) || 12
    },
    hero: {
      products_table: $("#f_products").value.trim(),
      categories: $("#f_cats").value.trim()
    }
  };
  await api("PUT", "/api/settings", settings);
  await loadState();
  render();
}

async function resetSettings() {
  await api("POST", "/api/settings/reset", {});
  await loadState();
  render();
}

async function clearLogs() {
  await api("POST", "/api/logs/clear", {});
  app.logs = await api("GET", "/api/logs?limit=80");
  render();
}

async function toggleLock() {
  await api("PUT", "/api/lock", { locked: !app.state.locked });
  await loadState();
  render();
}

// ---- boot ----------------------------------------------------------------

$("#btnHealth").addEventListener("click", () => runHealth());
$("#btnBackup").addEventListener("click", () => runBackup());
$("#btnLock").addEventListener("click", toggleLock);

(async () => {
  await loadState();
  render();
})();
</script>
</body>
</html>
"##;
